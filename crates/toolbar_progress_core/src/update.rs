use toolbar_logging::{progress_debug, progress_trace};

use crate::{Effect, Msg, NavigationEvent, NavigationHandle, ProgressMediator, TabSnapshot};

impl ProgressMediator {
    /// Applies a message and returns the effects the host must execute.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        if self.destroyed {
            progress_trace!("ignoring {:?} after destroy", msg);
            return Vec::new();
        }

        match msg {
            Msg::ActiveTabChanged(tab) => self.on_active_tab_changed(tab),
            Msg::Navigation { tab, event } => {
                if self.observed_tab != Some(tab.id) {
                    progress_trace!("dropping event from unobserved tab {}", tab.id);
                    return Vec::new();
                }
                self.on_navigation_event(&tab, event)
            }
            Msg::SimulatorTick { generation } => self.simulator.on_tick(generation, &mut self.model),
            Msg::SetPreventUpdates(prevent) => {
                progress_debug!("prevent updates={}", prevent);
                self.prevent_updates = prevent;
                Vec::new()
            }
            Msg::SimulateCompletion => self.simulator.start(&mut self.model),
            Msg::Destroy => self.destroy(),
        }
    }

    fn on_active_tab_changed(&mut self, tab: Option<TabSnapshot>) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(previous) = self.observed_tab.take() {
            effects.push(Effect::UnobserveTab(previous));
        }

        let Some(tab) = tab else {
            progress_debug!("active tab cleared");
            if self.settings.finish_without_tab {
                effects.extend(self.finish_load_progress(false));
            }
            return effects;
        };

        progress_debug!(
            "observing tab {} loading={} progress={}",
            tab.id,
            tab.is_loading,
            tab.progress
        );
        self.observed_tab = Some(tab.id);
        effects.push(Effect::ObserveTab(tab.id));

        if tab.is_loading && !self.is_internal(tab.url.as_ref(), tab.is_private) {
            effects.extend(self.begin_loading(tab.progress));
        } else {
            effects.extend(self.finish_load_progress(false));
        }
        effects
    }

    fn on_navigation_event(&mut self, tab: &TabSnapshot, event: NavigationEvent) -> Vec<Effect> {
        match event {
            NavigationEvent::Started(navigation) => self.on_navigation_started(tab, &navigation),
            NavigationEvent::ProgressChanged(progress) => {
                if self.suppresses_progress(tab) {
                    progress_trace!("progress {} ignored for internal page", progress);
                    return Vec::new();
                }
                self.update_load_progress(progress)
            }
            NavigationEvent::LoadStopped {
                to_different_document,
            } => {
                if !to_different_document {
                    return Vec::new();
                }
                // Fast-forward real progress; otherwise just drop the minimum floor.
                let mut effects = Vec::new();
                if tab.progress > self.settings.minimum_progress && tab.progress < 1.0 {
                    effects.extend(self.update_load_progress(1.0));
                }
                effects.extend(self.finish_load_progress(true));
                effects
            }
            NavigationEvent::ContentSwapped {
                did_start_load,
                did_finish_load,
            } => {
                // The load completed before it became visible, so no real
                // progress signal will follow.
                if did_start_load && did_finish_load && !self.prevent_updates {
                    progress_debug!("contents swapped after load, simulating progress");
                    return self.simulator.start(&mut self.model);
                }
                Vec::new()
            }
            NavigationEvent::Crashed => {
                progress_debug!("tab {} crashed", tab.id);
                self.finish_load_progress(false)
            }
        }
    }

    fn on_navigation_started(
        &mut self,
        tab: &TabSnapshot,
        navigation: &NavigationHandle,
    ) -> Vec<Effect> {
        if navigation.is_same_document || !navigation.is_primary_main_frame {
            progress_trace!("navigation start ignored: same document or subframe");
            return Vec::new();
        }
        if self.is_internal(navigation.url.as_ref(), tab.is_private) {
            return self.finish_load_progress(false);
        }
        progress_debug!("navigation started in tab {}", tab.id);
        self.begin_loading(tab.progress)
    }

    fn destroy(&mut self) -> Vec<Effect> {
        progress_debug!("destroy");
        self.destroyed = true;
        let mut effects = Vec::new();
        if let Some(tab) = self.observed_tab.take() {
            effects.push(Effect::UnobserveTab(tab));
        }
        effects.extend(self.simulator.halt());
        effects
    }
}
