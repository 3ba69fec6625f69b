use serde::{Deserialize, Serialize};

use crate::{CompletionState, ModelObserver, ProgressSnapshot, PropertyKey};

/// Visual progress bar driven by the view binder.
pub trait ProgressBarWidget {
    fn start(&mut self);
    fn set_progress(&mut self, progress: f32);
    fn finish(&mut self, animate: bool);
}

/// A single call made on a [`ProgressBarWidget`], for recording or transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum WidgetCall {
    Start,
    SetProgress { progress: f32 },
    Finish { animate: bool },
}

impl WidgetCall {
    pub fn apply(self, widget: &mut dyn ProgressBarWidget) {
        match self {
            WidgetCall::Start => widget.start(),
            WidgetCall::SetProgress { progress } => widget.set_progress(progress),
            WidgetCall::Finish { animate } => widget.finish(animate),
        }
    }
}

/// Projects one model change onto the widget.
pub fn bind(model: &ProgressSnapshot, key: PropertyKey, widget: &mut dyn ProgressBarWidget) {
    widget_call(model, key).apply(widget);
}

pub fn widget_call(model: &ProgressSnapshot, key: PropertyKey) -> WidgetCall {
    match key {
        PropertyKey::CompletionState => match model.completion_state {
            CompletionState::Unfinished => WidgetCall::Start,
            CompletionState::FinishedAnimate => WidgetCall::Finish { animate: true },
            CompletionState::FinishedNoAnimate => WidgetCall::Finish { animate: false },
        },
        PropertyKey::Progress => WidgetCall::SetProgress {
            progress: model.progress,
        },
    }
}

/// Model observer that forwards every change to its widget.
pub struct ProgressViewBinder<W> {
    widget: W,
}

impl<W: ProgressBarWidget> ProgressViewBinder<W> {
    pub fn new(widget: W) -> Self {
        Self { widget }
    }
}

impl<W: ProgressBarWidget> ModelObserver for ProgressViewBinder<W> {
    fn on_property_changed(&mut self, model: &ProgressSnapshot, key: PropertyKey) {
        bind(model, key, &mut self.widget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(completion_state: CompletionState, progress: f32) -> ProgressSnapshot {
        ProgressSnapshot {
            completion_state,
            progress,
        }
    }

    #[test]
    fn completion_state_maps_to_start_or_finish() {
        let key = PropertyKey::CompletionState;
        assert_eq!(
            widget_call(&snapshot(CompletionState::Unfinished, 0.0), key),
            WidgetCall::Start
        );
        assert_eq!(
            widget_call(&snapshot(CompletionState::FinishedAnimate, 1.0), key),
            WidgetCall::Finish { animate: true }
        );
        assert_eq!(
            widget_call(&snapshot(CompletionState::FinishedNoAnimate, 0.3), key),
            WidgetCall::Finish { animate: false }
        );
    }

    #[test]
    fn progress_maps_to_set_progress() {
        assert_eq!(
            widget_call(
                &snapshot(CompletionState::Unfinished, 0.42),
                PropertyKey::Progress
            ),
            WidgetCall::SetProgress { progress: 0.42 }
        );
    }

    #[test]
    fn widget_call_serializes_with_tag() {
        let json = serde_json::to_string(&WidgetCall::Finish { animate: true }).unwrap();
        assert_eq!(json, r#"{"call":"finish","animate":true}"#);
    }
}
