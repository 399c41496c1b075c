//! Runtime orchestration for the deterministic platformer simulation.
//!
//! This crate wraps [`platformer_core::World`] in a tokio worker, routes its
//! events through a topic-based bus, persists the high score, and paces
//! ticks against wall-clock time. Hosts embed [`Runtime`] and talk to the
//! world through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] stores the high score between sessions
//! - `workers` keeps the simulation task and the real-time driver internal
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle, StoreError};
pub use events::{Event, EventBus, Topic};
pub use repository::{FileHighScore, HighScoreStore, InMemoryHighScore};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::{Driver, FixedTimestep, StepSummary};
