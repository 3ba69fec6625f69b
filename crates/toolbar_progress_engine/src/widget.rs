use std::sync::mpsc;

use toolbar_progress_core::{ProgressBarWidget, WidgetCall};

/// Progress bar that forwards every call to a channel.
pub struct ChannelWidget {
    tx: mpsc::Sender<WidgetCall>,
}

impl ChannelWidget {
    pub fn new(tx: mpsc::Sender<WidgetCall>) -> Self {
        Self { tx }
    }

    fn send(&self, call: WidgetCall) {
        let _ = self.tx.send(call);
    }
}

impl ProgressBarWidget for ChannelWidget {
    fn start(&mut self) {
        self.send(WidgetCall::Start);
    }

    fn set_progress(&mut self, progress: f32) {
        self.send(WidgetCall::SetProgress { progress });
    }

    fn finish(&mut self, animate: bool) {
        self.send(WidgetCall::Finish { animate });
    }
}
