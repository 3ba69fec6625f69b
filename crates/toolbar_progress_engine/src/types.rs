use serde::{Deserialize, Serialize};
use toolbar_progress_core::TabId;
use url::Url;

fn default_true() -> bool {
    true
}

/// Browser-side operations that change tab state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BrowserCommand {
    OpenTab {
        id: TabId,
        #[serde(default)]
        url: Option<Url>,
        #[serde(default)]
        is_private: bool,
        #[serde(default)]
        select: bool,
    },
    CloseTab(TabId),
    SelectTab(Option<TabId>),
    StartNavigation {
        tab: TabId,
        #[serde(default)]
        url: Option<Url>,
        #[serde(default)]
        is_same_document: bool,
        #[serde(default = "default_true")]
        is_primary_main_frame: bool,
    },
    ReportProgress {
        tab: TabId,
        progress: f32,
    },
    StopLoading {
        tab: TabId,
        #[serde(default = "default_true")]
        to_different_document: bool,
    },
    Crash(TabId),
    SwapContents {
        tab: TabId,
        #[serde(default)]
        url: Option<Url>,
        did_start_load: bool,
        did_finish_load: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineCommand {
    Browser(BrowserCommand),
    SetPreventUpdates(bool),
    SimulateCompletion,
    Shutdown,
}

impl From<BrowserCommand> for EngineCommand {
    fn from(command: BrowserCommand) -> Self {
        EngineCommand::Browser(command)
    }
}
