//! Typed notifications the simulation emits for audio, HUD and telemetry.
//!
//! The world appends to an [`EventQueue`] while it ticks; the host drains the
//! queue after each tick. Nothing the host does with an event feeds back into
//! the simulation.

use crate::actor::EnemyKind;
use crate::geometry::{Aabb, Vec2};
use crate::pickup::PickupKind;
use crate::projectile::ProjectileKind;
use crate::state::EntityId;

/// Coarse grouping used by hosts to route events to different listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventCategory {
    Gameplay,
    Boss,
    Session,
}

#[derive(Clone, Debug, PartialEq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum GameEvent {
    PlayerHurt {
        hp: u32,
    },
    PlayerDied,
    ArrowFired {
        ammo: u8,
    },
    ArrowHitWall {
        at: Vec2,
    },
    ArrowHitEnemy {
        target: EntityId,
        damage: u32,
    },
    MeleeStrike {
        hitbox: Aabb,
        phase: u8,
    },
    EnemyHurt {
        id: EntityId,
        kind: EnemyKind,
        hp: u32,
    },
    EnemyDied {
        id: EntityId,
        kind: EnemyKind,
    },
    EnemyAttack {
        id: EntityId,
        kind: EnemyKind,
    },
    /// An enemy released a fireball or bullet.
    Throw {
        id: EntityId,
        projectile: ProjectileKind,
    },
    FireballExploded {
        at: Vec2,
    },
    BossAwakened,
    BossAppearanceDone,
    BossCutscene {
        frozen: bool,
    },
    BossHurt {
        hp: u32,
        damage: u32,
    },
    BossArmorStart {
        stacks: u8,
    },
    BossArmorEnd,
    BossMelee,
    BossThrowArm,
    BossLaserStart,
    BossLaserShot {
        remaining: u32,
    },
    BossLaserEnd,
    BossDied,
    PickupCollected {
        kind: PickupKind,
    },
    ScoreChanged {
        score: u64,
    },
    GameOver,
    Victory,
    NewHighScore {
        score: u64,
        previous: u64,
    },
}

impl GameEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            GameEvent::BossAwakened
            | GameEvent::BossAppearanceDone
            | GameEvent::BossCutscene { .. }
            | GameEvent::BossHurt { .. }
            | GameEvent::BossArmorStart { .. }
            | GameEvent::BossArmorEnd
            | GameEvent::BossMelee
            | GameEvent::BossThrowArm
            | GameEvent::BossLaserStart
            | GameEvent::BossLaserShot { .. }
            | GameEvent::BossLaserEnd
            | GameEvent::BossDied => EventCategory::Boss,
            GameEvent::ScoreChanged { .. }
            | GameEvent::GameOver
            | GameEvent::Victory
            | GameEvent::NewHighScore { .. } => EventCategory::Session,
            _ => EventCategory::Gameplay,
        }
    }

    /// Stable snake_case name, handy for logs and scripted assertions.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Append-only buffer of events produced during the current tick(s).
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Removes and returns everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_in_order() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::PlayerDied);
        queue.push(GameEvent::GameOver);
        let drained = queue.drain();
        assert_eq!(drained, vec![GameEvent::PlayerDied, GameEvent::GameOver]);
        assert!(queue.is_empty());
    }

    #[test]
    fn categories_route_boss_and_session() {
        assert_eq!(GameEvent::BossMelee.category(), EventCategory::Boss);
        assert_eq!(GameEvent::Victory.category(), EventCategory::Session);
        assert_eq!(
            GameEvent::ArrowFired { ammo: 3 }.category(),
            EventCategory::Gameplay
        );
        assert_eq!(GameEvent::BossLaserEnd.name(), "boss_laser_end");
    }
}
