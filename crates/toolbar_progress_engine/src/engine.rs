use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinHandle, LocalSet};
use toolbar_logging::{next_dispatch_seq, progress_debug, progress_warn};
use toolbar_progress_core::{
    Effect, LoadProgressCoordinator, Msg, NativePageClassifier, ProgressSettings, WidgetCall,
};

use crate::{ChannelWidget, EngineCommand, TabStrip};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to spawn ui thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("engine has shut down")]
    Closed,
}

/// Handle to the UI thread that owns the progress coordinator.
///
/// All tab events, effects and simulator ticks are processed in arrival
/// order on that single thread. Widget calls come back through
/// [`EngineHandle::try_recv`] / [`EngineHandle::recv_timeout`].
pub struct EngineHandle {
    cmd_tx: UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<WidgetCall>,
    thread: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn spawn(settings: ProgressSettings) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(EngineError::Runtime)?;

        let thread = thread::Builder::new()
            .name("toolbar-progress-ui".to_string())
            .spawn(move || {
                let local = LocalSet::new();
                local.block_on(&runtime, async move {
                    let (mut ui, effects) = UiLoop::new(settings, event_tx);
                    ui.execute(effects);
                    ui.run(cmd_rx).await;
                });
            })
            .map_err(EngineError::Spawn)?;

        Ok(Self {
            cmd_tx,
            event_rx,
            thread: Some(thread),
        })
    }

    pub fn send(&self, command: impl Into<EngineCommand>) -> Result<(), EngineError> {
        self.cmd_tx
            .send(command.into())
            .map_err(|_| EngineError::Closed)
    }

    pub fn try_recv(&self) -> Option<WidgetCall> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<WidgetCall> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Destroys the coordinator and waits for the UI thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                progress_warn!("ui thread panicked");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

struct UiLoop {
    coordinator: LoadProgressCoordinator,
    tabs: TabStrip,
    tick_tx: UnboundedSender<Msg>,
    tick_rx: UnboundedReceiver<Msg>,
    pending_tick: Option<JoinHandle<()>>,
}

impl UiLoop {
    fn new(settings: ProgressSettings, event_tx: mpsc::Sender<WidgetCall>) -> (Self, Vec<Effect>) {
        let tabs = TabStrip::new();
        let (coordinator, effects) = LoadProgressCoordinator::new(
            ChannelWidget::new(event_tx),
            settings,
            Box::new(NativePageClassifier),
            tabs.active_snapshot(),
        );
        let (tick_tx, tick_rx) = unbounded_channel();
        let ui = Self {
            coordinator,
            tabs,
            tick_tx,
            tick_rx,
            pending_tick: None,
        };
        (ui, effects)
    }

    async fn run(&mut self, mut cmd_rx: UnboundedReceiver<EngineCommand>) {
        loop {
            tokio::select! {
                command = cmd_rx.recv() => match command {
                    Some(EngineCommand::Shutdown) | None => break,
                    Some(command) => self.on_command(command),
                },
                Some(msg) = self.tick_rx.recv() => self.dispatch(msg),
            }
        }
        progress_debug!("ui loop shutting down");
        let effects = self.coordinator.destroy();
        self.execute(effects);
    }

    fn on_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Browser(command) => match self.tabs.apply(command) {
                Ok(msgs) => {
                    for msg in msgs {
                        self.dispatch(msg);
                    }
                }
                Err(err) => progress_warn!("browser command rejected: {}", err),
            },
            EngineCommand::SetPreventUpdates(prevent) => {
                self.dispatch(Msg::SetPreventUpdates(prevent));
            }
            EngineCommand::SimulateCompletion => self.dispatch(Msg::SimulateCompletion),
            EngineCommand::Shutdown => {}
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        next_dispatch_seq();
        let effects = self.coordinator.handle(msg);
        self.execute(effects);
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ObserveTab(id) => self.tabs.observe(id),
                Effect::UnobserveTab(id) => self.tabs.unobserve(id),
                Effect::ScheduleSimulatorTick { generation, delay } => {
                    self.cancel_tick();
                    let tick_tx = self.tick_tx.clone();
                    self.pending_tick = Some(tokio::task::spawn_local(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tick_tx.send(Msg::SimulatorTick { generation });
                    }));
                }
                Effect::CancelSimulatorTick => self.cancel_tick(),
            }
        }
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            handle.abort();
        }
    }
}
