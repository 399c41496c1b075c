//! Read-only view of the world for renderers and remote observers.
//!
//! A snapshot is taken between ticks and owns all of its data, so it can be
//! sent across threads while the simulation keeps running.

use crate::actor::{Boss, Combatant, Enemy, Facing, Player};
use crate::camera::Camera;
use crate::config::GameConfig;
use crate::geometry::Aabb;
use crate::physics::PhysicsBody;
use crate::pickup::Pickup;
use crate::projectile::Projectile;
use crate::state::{EntityId, GameState, Tick};

/// One drawable entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityView {
    /// Projectiles are anonymous.
    pub id: Option<EntityId>,
    pub kind: String,
    /// snake_case animation id.
    pub anim: String,
    pub frame: u16,
    pub facing: Facing,
    pub bounds: Aabb,
}

/// Numbers the HUD shows.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hud {
    pub hp: u32,
    pub max_hp: u32,
    pub ammo: u8,
    pub quiver_capacity: u8,
    pub score: u64,
    pub high_score: u64,
    /// Current and maximum boss health once it has been summoned.
    pub boss_hp: Option<(u32, u32)>,
    pub boss_armor: u8,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub camera: Camera,
    pub hud: Hud,
    pub player: EntityView,
    pub enemies: Vec<EntityView>,
    pub boss: Option<EntityView>,
    pub projectiles: Vec<EntityView>,
    pub pickups: Vec<EntityView>,
    pub state: GameState,
}

impl EntityView {
    pub fn of_player(player: &Player) -> Self {
        Self {
            id: Some(EntityId::PLAYER),
            kind: "player".to_owned(),
            anim: <&'static str>::from(player.anim()).to_owned(),
            frame: player.frame(),
            facing: player.facing(),
            bounds: player.hurtbox(),
        }
    }

    pub fn of_enemy(enemy: &Enemy) -> Self {
        Self {
            id: Some(enemy.id),
            kind: <&'static str>::from(enemy.kind).to_owned(),
            anim: <&'static str>::from(enemy.anim()).to_owned(),
            frame: enemy.frame(),
            facing: enemy.facing(),
            bounds: enemy.hurtbox(),
        }
    }

    pub fn of_boss(boss: &Boss) -> Self {
        Self {
            id: Some(EntityId::BOSS),
            kind: "boss".to_owned(),
            anim: <&'static str>::from(boss.anim()).to_owned(),
            frame: boss.frame(),
            facing: boss.facing(),
            bounds: boss.body().bounds(),
        }
    }

    pub fn of_projectile(projectile: &Projectile) -> Self {
        let (anim, frame) = projectile.anim();
        Self {
            id: None,
            kind: <&'static str>::from(projectile.kind()).to_owned(),
            anim: anim.to_owned(),
            frame,
            facing: Facing::from_sign(projectile.velocity().x).unwrap_or_default(),
            bounds: projectile.bounds(),
        }
    }

    pub fn of_pickup(pickup: &Pickup, config: &GameConfig) -> Self {
        Self {
            id: Some(pickup.id),
            kind: <&'static str>::from(pickup.kind).to_owned(),
            anim: "bob".to_owned(),
            frame: 0,
            facing: Facing::default(),
            bounds: pickup.bounds(&config.pickups),
        }
    }
}
