use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use toolbar_logging::progress_trace;
use toolbar_progress_core::{
    clamp_progress, ActiveTab, Msg, NavigationEvent, NavigationHandle, TabId, TabSnapshot,
};
use url::Url;

use crate::BrowserCommand;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabStripError {
    #[error("unknown tab {0}")]
    UnknownTab(TabId),
    #[error("tab {0} already exists")]
    DuplicateTab(TabId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabState {
    pub id: TabId,
    pub url: Option<Url>,
    pub progress: f32,
    pub is_loading: bool,
    pub is_private: bool,
    pub crashed: bool,
}

impl TabState {
    pub fn new(id: TabId, url: Option<Url>, is_private: bool) -> Self {
        Self {
            id,
            url,
            progress: 1.0,
            is_loading: false,
            is_private,
            crashed: false,
        }
    }
}

impl ActiveTab for TabState {
    fn id(&self) -> TabId {
        self.id
    }

    fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    fn progress(&self) -> f32 {
        self.progress
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn is_private(&self) -> bool {
        self.is_private
    }
}

/// Owns the browser's tabs and acts as the active-tab supplier.
///
/// Navigation events are only forwarded for tabs the mediator asked to
/// observe; supplier changes are always forwarded.
#[derive(Debug, Default)]
pub struct TabStrip {
    tabs: BTreeMap<TabId, TabState>,
    active: Option<TabId>,
    observed: BTreeSet<TabId>,
}

impl TabStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TabId) -> Option<&TabState> {
        self.tabs.get(&id)
    }

    pub fn active(&self) -> Option<&TabState> {
        self.active.and_then(|id| self.tabs.get(&id))
    }

    pub fn active_snapshot(&self) -> Option<TabSnapshot> {
        self.active().map(|tab| TabSnapshot::capture(tab))
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn observe(&mut self, id: TabId) {
        self.observed.insert(id);
    }

    pub fn unobserve(&mut self, id: TabId) {
        self.observed.remove(&id);
    }

    pub fn is_observed(&self, id: TabId) -> bool {
        self.observed.contains(&id)
    }

    /// Applies a command and returns the messages the mediator must see.
    pub fn apply(&mut self, command: BrowserCommand) -> Result<Vec<Msg>, TabStripError> {
        match command {
            BrowserCommand::OpenTab {
                id,
                url,
                is_private,
                select,
            } => {
                if self.tabs.contains_key(&id) {
                    return Err(TabStripError::DuplicateTab(id));
                }
                self.tabs.insert(id, TabState::new(id, url, is_private));
                if select {
                    return Ok(self.select(Some(id)));
                }
                Ok(Vec::new())
            }
            BrowserCommand::CloseTab(id) => {
                self.tabs
                    .remove(&id)
                    .ok_or(TabStripError::UnknownTab(id))?;
                self.observed.remove(&id);
                if self.active == Some(id) {
                    return Ok(self.select(None));
                }
                Ok(Vec::new())
            }
            BrowserCommand::SelectTab(id) => {
                if let Some(id) = id.filter(|id| !self.tabs.contains_key(id)) {
                    return Err(TabStripError::UnknownTab(id));
                }
                Ok(self.select(id))
            }
            BrowserCommand::StartNavigation {
                tab,
                url,
                is_same_document,
                is_primary_main_frame,
            } => {
                let state = self.tab_mut(tab)?;
                if is_primary_main_frame && url.is_some() {
                    state.url.clone_from(&url);
                }
                if is_primary_main_frame && !is_same_document {
                    state.is_loading = true;
                    state.progress = 0.0;
                    state.crashed = false;
                }
                let event = NavigationEvent::Started(NavigationHandle {
                    url,
                    is_same_document,
                    is_primary_main_frame,
                });
                Ok(self.emit(tab, event))
            }
            BrowserCommand::ReportProgress { tab, progress } => {
                let state = self.tab_mut(tab)?;
                state.progress = clamp_progress(progress);
                Ok(self.emit(tab, NavigationEvent::ProgressChanged(progress)))
            }
            BrowserCommand::StopLoading {
                tab,
                to_different_document,
            } => {
                // The event carries the progress reached before the stop.
                let msgs = self.emit(
                    tab,
                    NavigationEvent::LoadStopped {
                        to_different_document,
                    },
                );
                let state = self.tab_mut(tab)?;
                if to_different_document {
                    state.is_loading = false;
                }
                Ok(msgs)
            }
            BrowserCommand::Crash(tab) => {
                let state = self.tab_mut(tab)?;
                state.is_loading = false;
                state.crashed = true;
                Ok(self.emit(tab, NavigationEvent::Crashed))
            }
            BrowserCommand::SwapContents {
                tab,
                url,
                did_start_load,
                did_finish_load,
            } => {
                let state = self.tab_mut(tab)?;
                if url.is_some() {
                    state.url = url;
                }
                if did_finish_load {
                    state.is_loading = false;
                    state.progress = 1.0;
                } else if did_start_load {
                    state.is_loading = true;
                }
                Ok(self.emit(
                    tab,
                    NavigationEvent::ContentSwapped {
                        did_start_load,
                        did_finish_load,
                    },
                ))
            }
        }
    }

    fn tab_mut(&mut self, id: TabId) -> Result<&mut TabState, TabStripError> {
        self.tabs.get_mut(&id).ok_or(TabStripError::UnknownTab(id))
    }

    fn select(&mut self, id: Option<TabId>) -> Vec<Msg> {
        if self.active == id {
            return Vec::new();
        }
        self.active = id;
        vec![Msg::ActiveTabChanged(self.active_snapshot())]
    }

    fn emit(&self, id: TabId, event: NavigationEvent) -> Vec<Msg> {
        match self.tabs.get(&id) {
            Some(tab) if self.observed.contains(&id) => vec![Msg::Navigation {
                tab: TabSnapshot::capture(tab),
                event,
            }],
            Some(_) => {
                progress_trace!("tab {} not observed, dropping {:?}", id, event);
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}
