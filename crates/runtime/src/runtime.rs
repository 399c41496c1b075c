//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for hosts to drive the simulation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use platformer_core::{GameConfig, Level, World};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::repository::{HighScoreStore, InMemoryHighScore};
use crate::workers::{Command, Driver, FixedTimestep, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub tick_rate_hz: u32,
    /// Most ticks one driver frame may run before the rest is dropped.
    pub max_catch_up_ticks: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let game = GameConfig::default();
        Self {
            tick_rate_hz: game.world.tick_rate_hz,
            game,
            event_buffer_size: 256,
            command_buffer_size: 32,
            max_catch_up_ticks: 5,
        }
    }
}

/// Main runtime that owns the simulation worker.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    config: RuntimeConfig,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Real-time driver paced by the configured tick rate.
    pub fn driver(&self) -> Driver {
        Driver::new(
            self.handle(),
            FixedTimestep::new(self.config.tick_rate_hz, self.config.max_catch_up_ticks),
        )
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding [`RuntimeHandle`] clone is
    /// dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    level: Option<Level>,
    high_scores: Option<Arc<dyn HighScoreStore>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            level: None,
            high_scores: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the game tuning.
    pub fn game_config(mut self, game: GameConfig) -> Self {
        self.config.game = game;
        self
    }

    /// Set the level to play (required)
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the high-score store. Defaults to an in-memory store.
    pub fn high_scores(mut self, store: Arc<dyn HighScoreStore>) -> Self {
        self.high_scores = Some(store);
        self
    }

    /// Build the runtime and spawn the simulation worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let level = self.level.ok_or(RuntimeError::MissingLevel)?;
        let store = self
            .high_scores
            .unwrap_or_else(|| Arc::new(InMemoryHighScore::new()));

        let high_score = match store.load() {
            Ok(score) => score,
            Err(error) => {
                tracing::warn!(
                    target: "runtime::worker",
                    %error,
                    "could not read high score, starting from 0"
                );
                0
            }
        };

        let world = World::new(self.config.game.clone(), level, high_score)
            .map_err(RuntimeError::InvalidConfig)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = SimulationWorker::new(world, command_rx, event_bus.clone(), store);
        let sim_worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            config: self.config,
            sim_worker_handle,
        })
    }
}
