//! Simulation worker that owns the authoritative [`platformer_core::World`].
//!
//! Receives commands from [`crate::RuntimeHandle`], advances the world one
//! fixed step at a time, and publishes every drained event to the EventBus.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use platformer_core::{Cutscene, GameEvent, GameState, Intent, Tick, World, WorldSnapshot};

use crate::events::{Event, EventBus};
use crate::repository::HighScoreStore;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Advance `ticks` steps, optionally replacing the held input first.
    Step {
        input: Option<Intent>,
        ticks: u32,
        reply: oneshot::Sender<StepSummary>,
    },
    /// Replace the held input without stepping.
    SetInput { input: Intent },
    TogglePause { reply: oneshot::Sender<bool> },
    Reset { reply: oneshot::Sender<()> },
    SetViewport {
        width: f32,
        height: f32,
        reply: oneshot::Sender<()>,
    },
    SetBossCutscene {
        cutscene: Cutscene,
        reply: oneshot::Sender<()>,
    },
    /// Query a read-only snapshot of the world.
    QuerySnapshot { reply: oneshot::Sender<WorldSnapshot> },
}

/// What a `Step` command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepSummary {
    /// Tick counter after the last step.
    pub tick: Tick,
    /// Steps that actually advanced the world; overlays hold it still.
    pub simulated: u32,
    pub state: GameState,
    pub score: u64,
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    world: World,
    input: Intent,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    high_scores: Arc<dyn HighScoreStore>,
}

impl SimulationWorker {
    pub fn new(
        world: World,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        high_scores: Arc<dyn HighScoreStore>,
    ) -> Self {
        info!(
            target: "runtime::worker",
            enemies = world.enemies().len(),
            boss = world.boss().is_some(),
            high_score = world.high_score(),
            "SimulationWorker initialized"
        );

        Self {
            world,
            input: Intent::empty(),
            command_rx,
            event_bus,
            high_scores,
        }
    }

    /// Main worker loop. Ends once every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        info!(
            target: "runtime::worker",
            tick = self.world.tick_count().0,
            "SimulationWorker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Step {
                input,
                ticks,
                reply,
            } => {
                if let Some(input) = input {
                    self.input = input;
                }
                let summary = self.step(ticks);
                if reply.send(summary).is_err() {
                    debug!(target: "runtime::worker", "Step reply channel closed (caller dropped)");
                }
            }
            Command::SetInput { input } => {
                self.input = input;
            }
            Command::TogglePause { reply } => {
                let paused = self.world.toggle_pause();
                debug!(target: "runtime::worker", paused, "pause toggled");
                if reply.send(paused).is_err() {
                    debug!(target: "runtime::worker", "TogglePause reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                self.world.reset();
                self.input = Intent::empty();
                self.publish_events();
                info!(target: "runtime::worker", "session reset");
                if reply.send(()).is_err() {
                    debug!(target: "runtime::worker", "Reset reply channel closed (caller dropped)");
                }
            }
            Command::SetViewport {
                width,
                height,
                reply,
            } => {
                self.world.set_viewport(width, height);
                if reply.send(()).is_err() {
                    debug!(target: "runtime::worker", "SetViewport reply channel closed (caller dropped)");
                }
            }
            Command::SetBossCutscene { cutscene, reply } => {
                self.world.set_boss_cutscene(cutscene);
                self.publish_events();
                if reply.send(()).is_err() {
                    debug!(target: "runtime::worker", "SetBossCutscene reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.world.snapshot()).is_err() {
                    debug!(target: "runtime::worker", "QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn step(&mut self, ticks: u32) -> StepSummary {
        let mut simulated = 0;
        for _ in 0..ticks {
            if self.world.tick(self.input).simulated {
                simulated += 1;
            }
            self.publish_events();
        }

        debug!(
            target: "runtime::worker",
            requested = ticks,
            simulated,
            tick = self.world.tick_count().0,
            "stepped"
        );

        StepSummary {
            tick: self.world.tick_count(),
            simulated,
            state: *self.world.state(),
            score: self.world.score(),
        }
    }

    fn publish_events(&mut self) {
        let tick = self.world.tick_count();
        for event in self.world.drain_events() {
            if let GameEvent::NewHighScore { score, .. } = event {
                self.persist_high_score(score);
            }
            self.event_bus.publish(Event { tick, event });
        }
    }

    fn persist_high_score(&self, score: u64) {
        match self.high_scores.save(score) {
            Ok(()) => info!(target: "runtime::worker", score, "new high score saved"),
            Err(error) => warn!(
                target: "runtime::worker",
                score,
                %error,
                "failed to save high score"
            ),
        }
    }
}
