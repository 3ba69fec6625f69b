use toolbar_logging::{progress_debug, progress_trace};
use url::Url;

use crate::model::{clamp_progress, is_complete};
use crate::{
    CompletionState, Effect, PageClassifier, ProgressModel, ProgressSettings, ProgressSimulator,
    TabId, TabSnapshot,
};

/// Translates active-tab navigation events into progress model writes.
///
/// The mediator is the only writer of its model. It never performs side
/// effects itself; tab subscriptions and simulator timers are requested
/// through the returned [`Effect`]s.
pub struct ProgressMediator {
    pub(crate) model: ProgressModel,
    pub(crate) simulator: ProgressSimulator,
    pub(crate) settings: ProgressSettings,
    classifier: Box<dyn PageClassifier>,
    pub(crate) observed_tab: Option<TabId>,
    pub(crate) prevent_updates: bool,
    /// Highest progress written during the current loading episode. Zero
    /// whenever the bar is finished.
    episode_peak: f32,
    pub(crate) destroyed: bool,
}

impl ProgressMediator {
    pub fn new(
        model: ProgressModel,
        settings: ProgressSettings,
        classifier: Box<dyn PageClassifier>,
    ) -> Self {
        let simulator = ProgressSimulator::new(
            settings.simulator_increment,
            settings.simulator_tick_delay(),
        );
        Self {
            model,
            simulator,
            settings,
            classifier,
            observed_tab: None,
            prevent_updates: false,
            episode_peak: 0.0,
            destroyed: false,
        }
    }

    pub fn model(&self) -> &ProgressModel {
        &self.model
    }

    pub fn observed_tab(&self) -> Option<TabId> {
        self.observed_tab
    }

    pub fn prevent_updates(&self) -> bool {
        self.prevent_updates
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn simulator(&self) -> &ProgressSimulator {
        &self.simulator
    }

    pub(crate) fn is_internal(&self, url: Option<&Url>, is_private: bool) -> bool {
        url.is_some_and(|url| self.classifier.is_internal_page(url, is_private))
    }

    /// True when progress for this tab's current URL should not be shown.
    pub(crate) fn suppresses_progress(&self, tab: &TabSnapshot) -> bool {
        match tab.url.as_ref() {
            None => true,
            Some(url) => {
                self.classifier.is_ntp_url(url)
                    || self.classifier.is_internal_page(url, tab.is_private)
            }
        }
    }

    /// Cancels any simulation and begins a loading episode at the tab's progress.
    pub(crate) fn begin_loading(&mut self, tab_progress: f32) -> Vec<Effect> {
        if self.prevent_updates {
            progress_trace!("loading start suppressed: updates prevented");
            return Vec::new();
        }
        let mut effects = self.simulator.cancel(&mut self.model);
        self.start_load_progress();
        effects.extend(self.update_load_progress(tab_progress));
        effects
    }

    pub(crate) fn start_load_progress(&mut self) {
        if self.prevent_updates {
            progress_trace!("start suppressed: updates prevented");
            return;
        }
        self.episode_peak = 0.0;
        self.model.set_completion_state(CompletionState::Unfinished);
    }

    /// Writes `max(progress, minimum, episode peak)` and finishes on completion.
    pub(crate) fn update_load_progress(&mut self, progress: f32) -> Vec<Effect> {
        if self.prevent_updates {
            progress_trace!("progress {} suppressed: updates prevented", progress);
            return Vec::new();
        }
        let progress = clamp_progress(progress)
            .max(self.settings.minimum_progress)
            .max(self.episode_peak);
        self.episode_peak = progress;
        self.model.set_progress(progress);
        if is_complete(progress) {
            return self.finish_load_progress(true);
        }
        Vec::new()
    }

    pub(crate) fn finish_load_progress(&mut self, animate: bool) -> Vec<Effect> {
        progress_debug!("finish animate={}", animate);
        let effects = self.simulator.halt();
        self.episode_peak = 0.0;
        self.model.set_completion_state(if animate {
            CompletionState::FinishedAnimate
        } else {
            CompletionState::FinishedNoAnimate
        });
        effects
    }
}

impl std::fmt::Debug for ProgressMediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressMediator")
            .field("model", &self.model)
            .field("simulator", &self.simulator)
            .field("observed_tab", &self.observed_tab)
            .field("prevent_updates", &self.prevent_updates)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
