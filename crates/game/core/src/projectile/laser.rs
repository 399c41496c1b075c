use super::{Flight, ProjectileEnv, ProjectileKind, Shape, TileResponse};
use crate::config::LaserConfig;
use crate::geometry::{OrientedRect, Vec2};

/// Boss laser bolt. Passes through tiles and hurts the player at most once.
#[derive(Clone, Debug, PartialEq)]
pub struct LaserBolt {
    center: Vec2,
    velocity: Vec2,
    half_length: f32,
    half_thickness: f32,
    damage: u32,
    age: u32,
    lifetime: u32,
    spent: bool,
    dead: bool,
}

impl LaserBolt {
    pub fn new(origin: Vec2, target: Vec2, config: &LaserConfig) -> Self {
        let heading = (target - origin).angle();
        Self {
            center: origin,
            velocity: Vec2::from_angle(heading, config.speed),
            half_length: config.length * 0.5,
            half_thickness: config.thickness * 0.5,
            damage: config.damage,
            age: 0,
            lifetime: config.lifetime_ticks,
            spent: false,
            dead: false,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

impl Flight for LaserBolt {
    fn kind(&self) -> ProjectileKind {
        ProjectileKind::LaserBolt
    }

    fn tile_response(&self) -> TileResponse {
        TileResponse::Pierce
    }

    fn damage(&self) -> u32 {
        self.damage
    }

    fn update(&mut self, env: &ProjectileEnv) {
        self.center = self.center + self.velocity;
        self.age += 1;
        if self.age >= self.lifetime || env.culls(&self.shape().bounds()) {
            self.dead = true;
        }
    }

    fn shape(&self) -> Shape {
        Shape::Oriented(OrientedRect::new(
            self.center,
            self.half_length,
            self.half_thickness,
            self.velocity.angle(),
        ))
    }

    fn position(&self) -> Vec2 {
        self.center
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn is_armed(&self) -> bool {
        !self.dead && !self.spent
    }

    fn land_hit(&mut self) {
        self.spent = true;
    }

    fn hit_tile(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Aabb;

    #[test]
    fn damages_once_and_keeps_flying() {
        let env = ProjectileEnv {
            world_width: 5000.0,
            world_height: 640.0,
            cull_margin: 64.0,
            target: Vec2::ZERO,
        };
        let mut bolt = LaserBolt::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(400.0, 100.0),
            &LaserConfig::default(),
        );
        let player = Aabb::from_xywh(120.0, 80.0, 40.0, 40.0);
        assert!(bolt.is_armed() && bolt.shape().overlaps(&player));
        bolt.land_hit();
        assert!(!bolt.is_armed());
        bolt.update(&env);
        assert!(!bolt.is_dead());
        assert_eq!(bolt.position(), Vec2::new(115.0, 100.0));
    }

    #[test]
    fn expires_after_lifetime() {
        let env = ProjectileEnv {
            world_width: 1.0e9,
            world_height: 1.0e9,
            cull_margin: 64.0,
            target: Vec2::ZERO,
        };
        let config = LaserConfig::default();
        let mut bolt = LaserBolt::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), &config);
        for _ in 0..config.lifetime_ticks - 1 {
            bolt.update(&env);
        }
        assert!(!bolt.is_dead());
        bolt.update(&env);
        assert!(bolt.is_dead());
    }
}
