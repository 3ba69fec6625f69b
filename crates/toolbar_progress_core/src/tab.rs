use serde::{Deserialize, Serialize};
use url::Url;

pub type TabId = u64;

/// Queryable surface of a browser tab as seen by the progress mediator.
pub trait ActiveTab {
    fn id(&self) -> TabId;
    fn url(&self) -> Option<&Url>;
    fn progress(&self) -> f32;
    fn is_loading(&self) -> bool;
    fn is_private(&self) -> bool;
}

/// Copy of a tab's fields taken when an event was emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSnapshot {
    pub id: TabId,
    pub url: Option<Url>,
    pub progress: f32,
    pub is_loading: bool,
    pub is_private: bool,
}

impl TabSnapshot {
    pub fn capture(tab: &dyn ActiveTab) -> Self {
        Self {
            id: tab.id(),
            url: tab.url().cloned(),
            progress: tab.progress(),
            is_loading: tab.is_loading(),
            is_private: tab.is_private(),
        }
    }
}

impl ActiveTab for TabSnapshot {
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
