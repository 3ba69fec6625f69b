use serde::{Deserialize, Serialize};
use url::Url;

use crate::TabSnapshot;

/// Details of a navigation that just started in a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationHandle {
    pub url: Option<Url>,
    /// Fragment-only and history API navigations keep the same document.
    pub is_same_document: bool,
    pub is_primary_main_frame: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavigationEvent {
    Started(NavigationHandle),
    ProgressChanged(f32),
    LoadStopped { to_different_document: bool },
    Crashed,
    /// The tab's contents were replaced, e.g. by a prerendered page.
    ContentSwapped {
        did_start_load: bool,
        did_finish_load: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The active-tab supplier produced a new value.
    ActiveTabChanged(Option<TabSnapshot>),
    /// A tab reported a navigation event.
    Navigation {
        tab: TabSnapshot,
        event: NavigationEvent,
    },
    /// A scheduled simulator tick fired.
    SimulatorTick { generation: u64 },
    SetPreventUpdates(bool),
    SimulateCompletion,
    Destroy,
}
