use super::{Faction, Flight, ProjectileEnv, ProjectileKind, Shape, TileResponse};
use crate::config::ArrowConfig;
use crate::geometry::{OrientedRect, Vec2};

/// Player arrow: constant horizontal flight, gone on the first wall or hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    center: Vec2,
    velocity: Vec2,
    half_length: f32,
    half_thickness: f32,
    damage: u32,
    dead: bool,
}

impl Arrow {
    /// `direction` is the sign of travel along x.
    pub fn new(origin: Vec2, direction: f32, config: &ArrowConfig) -> Self {
        let direction = if direction < 0.0 { -1.0 } else { 1.0 };
        Self {
            center: origin,
            velocity: Vec2::new(config.speed * direction, 0.0),
            half_length: config.length * 0.5,
            half_thickness: config.thickness * 0.5,
            damage: config.damage,
            dead: false,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

impl Flight for Arrow {
    fn kind(&self) -> ProjectileKind {
        ProjectileKind::Arrow
    }

    fn faction(&self) -> Faction {
        Faction::Friendly
    }

    fn tile_response(&self) -> TileResponse {
        TileResponse::Stop
    }

    fn damage(&self) -> u32 {
        self.damage
    }

    fn update(&mut self, env: &ProjectileEnv) {
        self.center = self.center + self.velocity;
        if env.culls(&self.shape().bounds()) {
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
        !self.dead
    }

    fn land_hit(&mut self) {
        self.dead = true;
    }

    fn hit_tile(&mut self) {
        self.dead = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Aabb;

    #[test]
    fn flies_straight_until_culled() {
        let env = ProjectileEnv {
            world_width: 200.0,
            world_height: 200.0,
            cull_margin: 64.0,
            target: Vec2::ZERO,
        };
        let mut arrow = Arrow::new(Vec2::new(100.0, 50.0), -1.0, &ArrowConfig::default());
        arrow.update(&env);
        assert_eq!(arrow.position(), Vec2::new(86.0, 50.0));
        for _ in 0..20 {
            arrow.update(&env);
        }
        assert!(arrow.is_dead());
    }

    #[test]
    fn overlap_uses_rotated_shape() {
        let arrow = Arrow::new(Vec2::new(100.0, 50.0), 1.0, &ArrowConfig::default());
        assert!(arrow.shape().overlaps(&Aabb::from_xywh(110.0, 40.0, 20.0, 20.0)));
        assert!(!arrow.shape().overlaps(&Aabb::from_xywh(110.0, 60.0, 20.0, 20.0)));
    }
}
