#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use toolbar_progress_core::{
    Effect, LoadProgressCoordinator, Msg, NativePageClassifier, NavigationEvent, NavigationHandle,
    ProgressBarWidget, ProgressSettings, TabSnapshot, WidgetCall,
};
use url::Url;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(toolbar_logging::initialize_for_tests);
}

#[derive(Debug, Clone, Default)]
pub struct RecordingWidget {
    calls: Rc<RefCell<Vec<WidgetCall>>>,
}

impl RecordingWidget {
    pub fn take(&self) -> Vec<WidgetCall> {
        self.calls.borrow_mut().drain(..).collect()
    }
}

impl ProgressBarWidget for RecordingWidget {
    fn start(&mut self) {
        self.calls.borrow_mut().push(WidgetCall::Start);
    }

    fn set_progress(&mut self, progress: f32) {
        self.calls
            .borrow_mut()
            .push(WidgetCall::SetProgress { progress });
    }

    fn finish(&mut self, animate: bool) {
        self.calls.borrow_mut().push(WidgetCall::Finish { animate });
    }
}

pub fn tab(id: u64, url: &str, progress: f32, is_loading: bool) -> TabSnapshot {
    TabSnapshot {
        id,
        url: Some(Url::parse(url).unwrap()),
        progress,
        is_loading,
        is_private: false,
    }
}

pub fn idle_tab(id: u64, url: &str) -> TabSnapshot {
    tab(id, url, 1.0, false)
}

pub fn started(url: &str) -> NavigationEvent {
    NavigationEvent::Started(NavigationHandle {
        url: Some(Url::parse(url).unwrap()),
        is_same_document: false,
        is_primary_main_frame: true,
    })
}

pub fn nav(tab: &TabSnapshot, event: NavigationEvent) -> Msg {
    Msg::Navigation {
        tab: tab.clone(),
        event,
    }
}

pub fn coordinator(
    initial_tab: Option<TabSnapshot>,
) -> (LoadProgressCoordinator, RecordingWidget, Vec<Effect>) {
    coordinator_with(ProgressSettings::default(), initial_tab)
}

pub fn coordinator_with(
    settings: ProgressSettings,
    initial_tab: Option<TabSnapshot>,
) -> (LoadProgressCoordinator, RecordingWidget, Vec<Effect>) {
    init_logging();
    let widget = RecordingWidget::default();
    let (coordinator, effects) = LoadProgressCoordinator::new(
        widget.clone(),
        settings,
        Box::new(NativePageClassifier),
        initial_tab,
    );
    (coordinator, widget, effects)
}

/// Feeds scheduled ticks back until the simulator stops asking for more.
/// Returns the number of ticks delivered.
pub fn drain_ticks(coordinator: &mut LoadProgressCoordinator, mut effects: Vec<Effect>) -> usize {
    let mut ticks = 0;
    while let Some(generation) = effects.iter().find_map(|effect| match effect {
        Effect::ScheduleSimulatorTick { generation, .. } => Some(*generation),
        _ => None,
    }) {
        effects = coordinator.handle(Msg::SimulatorTick { generation });
        ticks += 1;
        assert!(ticks <= 100, "simulator never finished");
    }
    ticks
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
