use super::{Flight, ProjectileEnv, ProjectileKind, Shape, TileResponse};
use crate::config::BulletConfig;
use crate::geometry::{Aabb, Vec2};

/// Small round shot fired by grunts.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    center: Vec2,
    vx: f32,
    radius: f32,
    damage: u32,
    dead: bool,
}

impl Bullet {
    pub fn new(origin: Vec2, direction: f32, config: &BulletConfig) -> Self {
        let direction = if direction < 0.0 { -1.0 } else { 1.0 };
        Self {
            center: origin,
            vx: config.speed * direction,
            radius: config.radius,
            damage: config.damage,
            dead: false,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, 0.0)
    }
}

impl Flight for Bullet {
    fn kind(&self) -> ProjectileKind {
        ProjectileKind::Bullet
    }

    fn tile_response(&self) -> TileResponse {
        TileResponse::Stop
    }

    fn damage(&self) -> u32 {
        self.damage
    }

    fn update(&mut self, env: &ProjectileEnv) {
        self.center.x += self.vx;
        if self.center.x < 0.0 || self.center.x > env.world_width {
            self.dead = true;
        }
    }

    fn shape(&self) -> Shape {
        Shape::Box(Aabb::from_center(self.center, self.radius, self.radius))
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
