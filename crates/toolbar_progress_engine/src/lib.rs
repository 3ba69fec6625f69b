//! Toolbar progress engine: UI thread, tab strip and effect execution.
mod engine;
mod tabs;
mod types;
mod widget;

pub use engine::{EngineError, EngineHandle};
pub use tabs::{TabState, TabStrip, TabStripError};
pub use types::{BrowserCommand, EngineCommand};
pub use widget::ChannelWidget;
