//! Combat bookkeeping shared by every actor.
//!
//! - [`Quiver`]: per-arrow reload economy for the bow
//! - [`Health`] and [`Armor`]: hit points and the boss's escalating damage
//!   reduction
//!
//! All functions are deterministic and free of side effects beyond the value
//! they mutate.

pub mod damage;
pub mod quiver;

pub use damage::{
    Armor, ArmorHit, Health, armor_multiplier, discounted_damage, stacks_for_ratio,
};
pub use quiver::Quiver;

/// What a `hit()` call did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitResult {
    /// Target was invulnerable, dying or gone; nothing changed.
    Ignored,
    /// HP dropped but the target survives.
    Hurt { dealt: u32, remaining: u32 },
    /// This hit took the last HP; death started.
    Killed { dealt: u32 },
}

impl HitResult {
    pub fn landed(&self) -> bool {
        !matches!(self, HitResult::Ignored)
    }

    pub fn dealt(&self) -> u32 {
        match *self {
            HitResult::Ignored => 0,
            HitResult::Hurt { dealt, .. } | HitResult::Killed { dealt } => dealt,
        }
    }
}
