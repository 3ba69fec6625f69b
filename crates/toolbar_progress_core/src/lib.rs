//! Toolbar progress core: load-progress state machine and view binding.
mod binder;
mod coordinator;
mod effect;
mod mediator;
mod model;
mod msg;
pub mod page;
mod settings;
mod simulator;
mod tab;
mod update;

pub use binder::{bind, widget_call, ProgressBarWidget, ProgressViewBinder, WidgetCall};
pub use coordinator::LoadProgressCoordinator;
pub use effect::Effect;
pub use mediator::ProgressMediator;
pub use model::{
    clamp_progress, is_complete, CompletionState, ModelObserver, ObserverId, ProgressModel,
    ProgressSnapshot, PropertyKey, PROGRESS_EPSILON,
};
pub use msg::{Msg, NavigationEvent, NavigationHandle};
pub use page::{NativePageClassifier, PageClassifier};
pub use settings::{ProgressSettings, SettingsError};
pub use simulator::ProgressSimulator;
pub use tab::{ActiveTab, TabId, TabSnapshot};
