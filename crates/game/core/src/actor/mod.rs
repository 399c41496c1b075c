//! Player, enemies and the boss.
//!
//! Every actor owns a [`Body`](crate::physics::Body), health, and an animation
//! state machine. They share the [`Combatant`] capability so the world can
//! resolve hits without knowing which concrete actor it is talking to.

pub mod boss;
pub mod enemy;
pub mod player;

pub use boss::{Boss, BossAction, BossAnim, BossContext, BossUpdate, Cutscene, Presence};
pub use enemy::{Enemy, EnemyAnim, EnemyContext, EnemyStrike, EnemyUpdate};
pub use player::{MeleeStrike, Player, PlayerAnim, PlayerUpdate};

use crate::combat::HitResult;
use crate::config::{EnemyConfig, GameConfig};
use crate::geometry::Aabb;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnemyKind {
    Skeleton,
    Goblin,
    Witch,
    /// Small patrolling shooter.
    Grunt,
}

impl EnemyKind {
    pub fn tuning(self, config: &GameConfig) -> &EnemyConfig {
        match self {
            EnemyKind::Skeleton => &config.skeleton,
            EnemyKind::Goblin => &config.goblin,
            EnemyKind::Witch => &config.witch,
            EnemyKind::Grunt => &config.grunt,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Direction of a non-zero value; `None` for zero.
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(Facing::Right)
        } else if value < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Alive, playing its death animation, or removable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Life {
    #[default]
    Alive,
    Dying,
    /// Death animation finished; the world sweeps the actor out.
    Gone,
}

/// Anything that can take damage.
pub trait Combatant {
    fn life(&self) -> Life;

    /// Area that receives hits.
    fn hurtbox(&self) -> Aabb;

    /// True when a hit right now would change something.
    fn is_vulnerable(&self) -> bool;

    /// Applies a hit. Invulnerable, dying and gone targets ignore it.
    fn hit(&mut self, damage: u32) -> HitResult;

    fn is_alive(&self) -> bool {
        self.life() == Life::Alive
    }
}

/// Rectangle `reach` px deep in front of `body`, centered on `center_y`.
pub(crate) fn front_box(body: &Aabb, facing: Facing, reach: f32, center_y: f32, half_h: f32) -> Aabb {
    match facing {
        Facing::Right => Aabb::new(body.right, center_y - half_h, body.right + reach, center_y + half_h),
        Facing::Left => Aabb::new(body.left - reach, center_y - half_h, body.left, center_y + half_h),
    }
}
