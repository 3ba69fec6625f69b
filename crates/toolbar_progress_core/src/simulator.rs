use std::time::Duration;

use toolbar_logging::{progress_debug, progress_trace};

use crate::model::is_complete;
use crate::{CompletionState, Effect, ProgressModel};

/// Generates an evenly incrementing fake progress sequence.
///
/// Ticks are delivered by the host as `Msg::SimulatorTick`. Every start or
/// stop bumps the generation, so a tick that was already in flight when the
/// simulator was cancelled is recognised as stale and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSimulator {
    increment: f32,
    tick_delay: Duration,
    generation: u64,
    steps: u32,
    running: bool,
}

impl ProgressSimulator {
    pub fn new(increment: f32, tick_delay: Duration) -> Self {
        Self {
            increment,
            tick_delay,
            generation: 0,
            steps: 0,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn start(&mut self, model: &mut ProgressModel) -> Vec<Effect> {
        self.generation += 1;
        self.steps = 0;
        self.running = true;
        progress_debug!("simulator start generation={}", self.generation);

        model.set_completion_state(CompletionState::Unfinished);
        model.set_progress(0.0);
        vec![Effect::ScheduleSimulatorTick {
            generation: self.generation,
            delay: Duration::ZERO,
        }]
    }

    pub fn on_tick(&mut self, generation: u64, model: &mut ProgressModel) -> Vec<Effect> {
        if !self.running || generation != self.generation {
            progress_trace!(
                "stale simulator tick generation={} current={}",
                generation,
                self.generation
            );
            return Vec::new();
        }

        self.steps += 1;
        let progress = (self.steps as f32 * self.increment).min(1.0);
        model.set_progress(progress);

        if is_complete(progress) {
            self.running = false;
            self.generation += 1;
            progress_debug!("simulator finished after {} ticks", self.steps);
            model.set_completion_state(CompletionState::FinishedAnimate);
            return Vec::new();
        }

        vec![Effect::ScheduleSimulatorTick {
            generation: self.generation,
            delay: self.tick_delay,
        }]
    }

    /// Stops the simulation and marks the model finished without animation.
    pub fn cancel(&mut self, model: &mut ProgressModel) -> Vec<Effect> {
        let effects = self.halt();
        model.set_completion_state(CompletionState::FinishedNoAnimate);
        effects
    }

    /// Invalidates any pending tick without touching the model.
    pub fn halt(&mut self) -> Vec<Effect> {
        if !self.running {
            return Vec::new();
        }
        self.running = false;
        self.generation += 1;
        progress_debug!("simulator halted");
        vec![Effect::CancelSimulatorTick]
    }
}
