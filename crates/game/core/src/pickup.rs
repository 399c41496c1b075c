//! Collectible items placed by level markers.

use crate::config::PickupConfig;
use crate::geometry::{Aabb, Vec2};
use crate::state::EntityId;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PickupKind {
    /// Restores player health.
    Heart,
    /// Returns spent arrows to the quiver immediately.
    Arrows,
}

/// A floating item that bobs in place until the player touches it.
#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub id: EntityId,
    pub kind: PickupKind,
    /// Resting center, before the bob offset.
    anchor: Vec2,
    half: f32,
    phase: f32,
    collected: bool,
}

impl Pickup {
    /// Places the item so that it rests on `foot` (bottom-center of its cell).
    pub fn new(id: EntityId, kind: PickupKind, foot: Vec2, config: &PickupConfig) -> Self {
        let half = config.size * 0.5;
        Self {
            id,
            kind,
            anchor: Vec2::new(foot.x, foot.y - half - config.bob_amplitude),
            half,
            phase: 0.0,
            collected: false,
        }
    }

    pub fn update(&mut self, config: &PickupConfig) {
        self.phase = (self.phase + config.bob_speed) % std::f32::consts::TAU;
    }

    pub fn center(&self, config: &PickupConfig) -> Vec2 {
        Vec2::new(
            self.anchor.x,
            self.anchor.y + self.phase.sin() * config.bob_amplitude,
        )
    }

    pub fn bounds(&self, config: &PickupConfig) -> Aabb {
        Aabb::from_center(self.center(config), self.half, self.half)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Marks the item as taken. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bob_stays_within_amplitude() {
        let config = PickupConfig::default();
        let mut pickup = Pickup::new(
            EntityId(5),
            PickupKind::Heart,
            Vec2::new(48.0, 320.0),
            &config,
        );
        for _ in 0..200 {
            pickup.update(&config);
            let bounds = pickup.bounds(&config);
            assert!(bounds.bottom <= 320.0 + 1e-3);
            assert!(bounds.bottom >= 320.0 - 2.0 * config.bob_amplitude - 1e-3);
        }
    }

    #[test]
    fn collect_once() {
        let config = PickupConfig::default();
        let mut pickup = Pickup::new(EntityId(5), PickupKind::Arrows, Vec2::ZERO, &config);
        assert!(pickup.collect());
        assert!(!pickup.collect());
    }
}
