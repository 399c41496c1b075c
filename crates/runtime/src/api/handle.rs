//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the simulation or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use platformer_core::{Cutscene, Intent, WorldSnapshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, StepSummary};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Advance `ticks` fixed steps. `Some(input)` replaces the held input
    /// first; `None` keeps the last one.
    pub async fn step(&self, input: Option<Intent>, ticks: u32) -> Result<StepSummary> {
        self.request(|reply| Command::Step {
            input,
            ticks,
            reply,
        })
        .await
    }

    /// Replace the input held for subsequent ticks.
    pub async fn set_input(&self, input: Intent) -> Result<()> {
        self.command_tx
            .send(Command::SetInput { input })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Flip the pause overlay. Returns the new value.
    pub async fn toggle_pause(&self) -> Result<bool> {
        self.request(|reply| Command::TogglePause { reply }).await
    }

    /// Restart the session from the level's spawn points.
    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Command::Reset { reply }).await
    }

    pub async fn set_viewport(&self, width: f32, height: f32) -> Result<()> {
        self.request(|reply| Command::SetViewport {
            width,
            height,
            reply,
        })
        .await
    }

    /// Freeze or release the boss for a scripted sequence.
    pub async fn set_boss_cutscene(&self, cutscene: Cutscene) -> Result<()> {
        self.request(|reply| Command::SetBossCutscene { cutscene, reply })
            .await
    }

    /// Query a read-only snapshot of the world
    pub async fn query_snapshot(&self) -> Result<WorldSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Gameplay` - Player, enemies, projectiles, pickups
    /// - `Topic::Boss` - Boss lifecycle and attacks
    /// - `Topic::Session` - Score, game over, victory, high score
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
