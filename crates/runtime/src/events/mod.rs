//! Topic-based event bus for simulation events.
//!
//! The worker drains the world's event queue after every tick and publishes
//! each event to the topic matching its category. Consumers subscribe only to
//! the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
