//! Kinematic bodies moved by the tile resolver.

use crate::geometry::{Aabb, Vec2};

bitflags::bitflags! {
    /// Which sides of a body were stopped during the last resolve pass.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Contacts: u8 {
        const WALL_LEFT = 1 << 0;
        const WALL_RIGHT = 1 << 1;
        const FLOOR = 1 << 2;
        const CEILING = 1 << 3;
    }
}

impl Contacts {
    pub fn hit_wall(self) -> bool {
        self.intersects(Contacts::WALL_LEFT | Contacts::WALL_RIGHT)
    }
}

/// Position, velocity and extents of a moving entity.
///
/// `(x, y)` is the top-left corner. `grounded` is only meaningful right after
/// [`crate::env::TileMap::resolve_move`] ran for this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub w: f32,
    pub h: f32,
    pub grounded: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            w,
            h,
            grounded: false,
        }
    }

    /// Places a body so that its feet rest on `foot` (bottom-center point).
    pub fn standing_at(foot: Vec2, w: f32, h: f32) -> Self {
        Self::new(foot.x - w * 0.5, foot.y - h, w, h)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_xywh(self.x, self.y, self.w, self.h)
    }

    pub fn bounds_at(&self, x: f32, y: f32) -> Aabb {
        Aabb::from_xywh(x, y, self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }

    /// Adds one tick of gravity, capped at the terminal fall speed.
    pub fn apply_gravity(&mut self, gravity: f32, max_fall_speed: f32) {
        self.vy = (self.vy + gravity).min(max_fall_speed);
    }

    /// Accelerates `vx` toward `desired` by `accel`, capped at `max`.
    pub fn steer_x(&mut self, desired: f32, accel: f32, max: f32) {
        let delta = desired - self.vx;
        if delta.abs() <= accel {
            self.vx = desired;
        } else {
            self.vx += accel * delta.signum();
        }
        self.vx = self.vx.clamp(-max, max);
    }
}

/// Capability shared by every entity the tile resolver can move.
pub trait PhysicsBody {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn bounds(&self) -> Aabb {
        self.body().bounds()
    }

    fn center(&self) -> Vec2 {
        self.body().center()
    }
}

impl PhysicsBody for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_respects_terminal_speed() {
        let mut body = Body::new(0.0, 0.0, 10.0, 10.0);
        for _ in 0..100 {
            body.apply_gravity(0.5, 12.0);
        }
        assert_eq!(body.vy, 12.0);
    }

    #[test]
    fn steering_settles_on_target() {
        let mut body = Body::new(0.0, 0.0, 10.0, 10.0);
        for _ in 0..50 {
            body.steer_x(3.0, 0.35, 10.0);
        }
        assert_eq!(body.vx, 3.0);
        body.steer_x(-20.0, 100.0, 5.0);
        assert_eq!(body.vx, -5.0);
    }

    #[test]
    fn standing_at_places_feet_on_point() {
        let body = Body::standing_at(Vec2::new(100.0, 320.0), 20.0, 40.0);
        assert_eq!(body.bounds().bottom, 320.0);
        assert_eq!(body.center().x, 100.0);
    }
}
