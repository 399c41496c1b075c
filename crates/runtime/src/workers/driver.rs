//! Wall-clock pacing for the fixed-step simulation.
//!
//! [`FixedTimestep`] turns elapsed real time into a number of logical ticks.
//! [`Driver`] polls it on a tokio interval and asks the worker for that many
//! steps, so a slow frame runs several ticks and a fast one may run none.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::api::{Result, RuntimeHandle};
use crate::workers::StepSummary;

/// Time accumulator producing whole ticks.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
    max_catch_up: u32,
    last_due: u32,
    dropped: u64,
}

impl FixedTimestep {
    /// `tick_rate_hz` and `max_catch_up` are clamped to at least 1.
    pub fn new(tick_rate_hz: u32, max_catch_up: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / tick_rate_hz.max(1),
            accumulator: Duration::ZERO,
            max_catch_up: max_catch_up.max(1),
            last_due: 0,
            dropped: 0,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Adds `elapsed` and returns how many ticks are due now.
    ///
    /// At most `max_catch_up` ticks are returned; whole steps beyond that are
    /// discarded and counted in [`Self::dropped`].
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_catch_up {
            self.accumulator -= self.step;
            due += 1;
        }
        if self.accumulator >= self.step {
            let behind = self.accumulator.as_nanos() / self.step.as_nanos().max(1);
            self.dropped += behind as u64;
            self.accumulator = Duration::from_nanos(
                (self.accumulator.as_nanos() % self.step.as_nanos().max(1)) as u64,
            );
        }
        self.last_due = due;
        due
    }

    /// True when the last [`Self::advance`] ran at least one tick.
    pub fn should_render(&self) -> bool {
        self.last_due > 0
    }

    /// Ticks discarded because the host fell too far behind.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
        self.last_due = 0;
    }
}

/// Real-time loop around a [`RuntimeHandle`].
pub struct Driver {
    handle: RuntimeHandle,
    timestep: FixedTimestep,
    poll: Duration,
}

impl Driver {
    pub fn new(handle: RuntimeHandle, timestep: FixedTimestep) -> Self {
        let poll = timestep.step();
        Self {
            handle,
            timestep,
            poll,
        }
    }

    /// Poll period; defaults to one tick.
    pub fn with_poll_interval(mut self, poll: Duration) -> Self {
        self.poll = poll.max(Duration::from_millis(1));
        self
    }

    /// Runs until `shutdown` completes. `on_frame` is called after every
    /// batch that advanced at least one tick, which is where a host renders.
    pub async fn run<S, F>(mut self, shutdown: S, mut on_frame: F) -> Result<()>
    where
        S: Future<Output = ()>,
        F: FnMut(&StepSummary),
    {
        let mut interval = tokio::time::interval(self.poll);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();
        tokio::pin!(shutdown);

        info!(
            target: "runtime::driver",
            step_us = self.timestep.step().as_micros() as u64,
            "driver started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {
                    let now = Instant::now();
                    let due = self.timestep.advance(now - last);
                    last = now;
                    if due == 0 {
                        continue;
                    }
                    let summary = self.handle.step(None, due).await?;
                    if self.timestep.should_render() {
                        on_frame(&summary);
                    }
                }
            }
        }

        debug!(
            target: "runtime::driver",
            dropped = self.timestep.dropped(),
            "driver stopped"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sixty() -> FixedTimestep {
        FixedTimestep::new(60, 5)
    }

    #[test]
    fn short_frames_accumulate() {
        let mut timestep = sixty();
        let step = timestep.step();
        assert_eq!(timestep.advance(step / 2), 0);
        assert!(!timestep.should_render());
        assert_eq!(timestep.advance(step / 2), 1);
        assert!(timestep.should_render());
    }

    #[test]
    fn long_frame_runs_several_ticks() {
        let mut timestep = sixty();
        assert_eq!(timestep.advance(timestep.step() * 3), 3);
        assert_eq!(timestep.dropped(), 0);
    }

    #[test]
    fn catch_up_is_capped() {
        let mut timestep = sixty();
        assert_eq!(timestep.advance(timestep.step() * 9), 5);
        assert_eq!(timestep.dropped(), 4);
        assert_eq!(timestep.advance(Duration::ZERO), 0);
    }
}
