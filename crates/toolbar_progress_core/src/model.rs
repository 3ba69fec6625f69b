use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether progress has reached 1.0.
pub const PROGRESS_EPSILON: f32 = 1e-3;

/// Returns true when `value` is 1.0 within [`PROGRESS_EPSILON`].
pub fn is_complete(value: f32) -> bool {
    (value - 1.0).abs() < PROGRESS_EPSILON
}

/// Clamps a raw progress value into `[0, 1]`. NaN becomes 0.
pub fn clamp_progress(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompletionState {
    Unfinished,
    FinishedAnimate,
    #[default]
    FinishedNoAnimate,
}

impl CompletionState {
    pub fn is_finished(self) -> bool {
        !matches!(self, CompletionState::Unfinished)
    }
}

/// Names one field of the model in change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    CompletionState,
    Progress,
}

/// Read-only copy of the model handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressSnapshot {
    pub completion_state: CompletionState,
    pub progress: f32,
}

pub trait ModelObserver {
    /// Called synchronously after `key` changed.
    fn on_property_changed(&mut self, model: &ProgressSnapshot, key: PropertyKey);
}

impl<F> ModelObserver for F
where
    F: FnMut(&ProgressSnapshot, PropertyKey),
{
    fn on_property_changed(&mut self, model: &ProgressSnapshot, key: PropertyKey) {
        self(model, key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Two-field observable record backing the toolbar progress bar.
///
/// Writes that leave a field unchanged are not reported.
#[derive(Default)]
pub struct ProgressModel {
    completion_state: CompletionState,
    progress: f32,
    observers: Vec<(ObserverId, Box<dyn ModelObserver>)>,
    next_observer_id: u64,
}

impl ProgressModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completion_state(&self) -> CompletionState {
        self.completion_state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            completion_state: self.completion_state,
            progress: self.progress,
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn ModelObserver>) -> ObserverId {
        self.next_observer_id += 1;
        let id = ObserverId(self.next_observer_id);
        self.observers.push((id, observer));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn set_completion_state(&mut self, state: CompletionState) {
        if self.completion_state == state {
            return;
        }
        self.completion_state = state;
        self.notify(PropertyKey::CompletionState);
    }

    pub fn set_progress(&mut self, value: f32) {
        let value = clamp_progress(value);
        if self.progress == value {
            return;
        }
        self.progress = value;
        self.notify(PropertyKey::Progress);
    }

    fn notify(&mut self, key: PropertyKey) {
        let snapshot = self.snapshot();
        for (_, observer) in self.observers.iter_mut() {
            observer.on_property_changed(&snapshot, key);
        }
    }
}

impl std::fmt::Debug for ProgressModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressModel")
            .field("completion_state", &self.completion_state)
            .field("progress", &self.progress)
            .field("observers", &self.observers.len())
            .finish()
    }
}
