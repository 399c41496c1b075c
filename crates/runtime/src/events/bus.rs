//! Topic-based event bus implementation.

use std::sync::Arc;

use platformer_core::{EventCategory, GameEvent, Tick};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Player, enemy, projectile and pickup events
    Gameplay,
    /// Boss lifecycle and attack events
    Boss,
    /// Score and end-of-session events
    Session,
}

impl From<EventCategory> for Topic {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Gameplay => Topic::Gameplay,
            EventCategory::Boss => Topic::Boss,
            EventCategory::Session => Topic::Session,
        }
    }
}

/// A simulation event stamped with the tick that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub tick: Tick,
    pub event: GameEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        self.event.category().into()
    }
}

struct Channels {
    gameplay: broadcast::Sender<Event>,
    boss: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Gameplay => &self.gameplay,
            Topic::Boss => &self.boss,
            Topic::Session => &self.session,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; a lagging receiver
/// loses the oldest events.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                gameplay: broadcast::channel(capacity).0,
                boss: broadcast::channel(capacity).0,
                session: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_route_by_category() {
        let bus = EventBus::with_capacity(8);
        let mut boss_rx = bus.subscribe(Topic::Boss);
        let mut session_rx = bus.subscribe(Topic::Session);

        bus.publish(Event {
            tick: Tick(3),
            event: GameEvent::BossAwakened,
        });
        bus.publish(Event {
            tick: Tick(4),
            event: GameEvent::GameOver,
        });

        assert_eq!(boss_rx.try_recv().map(|e| e.tick), Ok(Tick(3)));
        assert!(boss_rx.try_recv().is_err());
        assert_eq!(
            session_rx.try_recv().map(|e| e.event),
            Ok(GameEvent::GameOver)
        );
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(Event {
            tick: Tick::ZERO,
            event: GameEvent::PlayerDied,
        });
    }
}
