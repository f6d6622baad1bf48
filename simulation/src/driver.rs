//! Clock and frame-sink collaborators plus the cooperative tick loop.

use std::time::{Duration, Instant};

use maw_core::{ControlState, Frame, GameOutcome, InputSource};

use crate::Simulation;

/// Source of the elapsed time fed into each tick.
pub trait Clock {
    /// Time elapsed since the previous sample.
    fn elapsed(&mut self) -> Duration;
}

/// Clock measuring wall time between samples.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    last: Instant,
}

impl MonotonicClock {
    /// Starts measuring from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// Clock returning the same step on every sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock {
    step: Duration,
}

impl FixedClock {
    /// Creates a clock advancing by `step` per sample.
    #[must_use]
    pub const fn new(step: Duration) -> Self {
        Self { step }
    }
}

impl Clock for FixedClock {
    fn elapsed(&mut self) -> Duration {
        self.step
    }
}

/// Receiver of the drawable state produced after each tick.
pub trait FrameSink {
    /// Presents the frame of the tick that just finished.
    fn present(&mut self, frame: &Frame);

    /// Reports whether the presenter asked the loop to stop.
    fn should_close(&self) -> bool {
        false
    }
}

/// Why [`run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The exit key was held at the top of a tick.
    ExitRequested,
    /// The frame sink asked to close.
    SinkClosed,
    /// The configured tick limit was reached.
    TickLimit,
    /// The game reached its terminal state.
    GameOver,
}

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed by the loop.
    pub ticks: u64,
    /// Why the loop stopped.
    pub reason: StopReason,
    /// Outcome of the game when it finished.
    pub outcome: Option<GameOutcome>,
}

/// Drives the simulation until exit, sink close, game over or the tick limit.
///
/// Cancellation is checked at the top of every tick, before input is acted on.
pub fn run<I, C, S>(
    simulation: &mut Simulation,
    input: &I,
    clock: &mut C,
    sink: &mut S,
    max_ticks: Option<u64>,
) -> RunSummary
where
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
    S: FrameSink + ?Sized,
{
    let mut ticks = 0;
    let reason = loop {
        if sink.should_close() {
            break StopReason::SinkClosed;
        }
        let controls = ControlState::sample(input);
        if controls.exit {
            break StopReason::ExitRequested;
        }
        if max_ticks.is_some_and(|limit| ticks >= limit) {
            break StopReason::TickLimit;
        }
        if simulation.is_finished() {
            break StopReason::GameOver;
        }

        simulation.step(controls, clock.elapsed());
        ticks += 1;
        sink.present(&simulation.frame());
    };

    RunSummary {
        ticks,
        reason,
        outcome: simulation.frame().outcome,
    }
}
