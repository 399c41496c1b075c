//! Projectiles: arrows, fireballs, laser bolts, boss arm shards and bullets.
//!
//! Each kind is a small state machine with its own tile and lifetime rules.
//! The world owns them in one flat collection and talks to them through
//! [`Projectile`], which forwards to the [`Flight`] implementation of the
//! concrete kind.
//!
//! Damage is a two-step handshake: [`Projectile::touches`] reports a possible
//! hit, the world decides whether the target accepts it, and only then
//! [`Projectile::land_hit`] latches the projectile so it cannot hurt again.

mod arm_shard;
mod arrow;
mod bullet;
mod fireball;
mod laser;

pub use arm_shard::{ArmShard, ShardPhase};
pub use arrow::Arrow;
pub use bullet::Bullet;
pub use fireball::Fireball;
pub use laser::LaserBolt;

use crate::geometry::{Aabb, OrientedRect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProjectileKind {
    Arrow,
    Fireball,
    LaserBolt,
    ArmShard,
    Bullet,
}

/// Which side a projectile damages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Faction {
    /// Fired by the player; hurts enemies and the boss.
    Friendly,
    /// Fired by enemies or the boss; hurts the player.
    Hostile,
}

/// What happens when a projectile overlaps a solid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileResponse {
    /// Removed on contact.
    Stop,
    /// Stops and plays an explosion before removal.
    Explode,
    /// Ignores tiles entirely.
    Pierce,
}

/// Read-only world facts a projectile needs to advance one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileEnv {
    pub world_width: f32,
    pub world_height: f32,
    /// Distance past the world edge before a projectile is culled.
    pub cull_margin: f32,
    /// Current player center, for kinds that snapshot their target.
    pub target: Vec2,
}

impl ProjectileEnv {
    /// True once `bounds` lies entirely outside the world expanded by the margin.
    pub fn culls(&self, bounds: &Aabb) -> bool {
        let m = self.cull_margin;
        bounds.right < -m
            || bounds.left > self.world_width + m
            || bounds.bottom < -m
            || bounds.top > self.world_height + m
    }
}

/// Collision shape of a projectile this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Box(Aabb),
    Oriented(OrientedRect),
}

impl Shape {
    pub fn bounds(&self) -> Aabb {
        match self {
            Shape::Box(rect) => *rect,
            Shape::Oriented(rect) => rect.bounds(),
        }
    }

    pub fn overlaps(&self, target: &Aabb) -> bool {
        match self {
            Shape::Box(rect) => rect.overlaps(target),
            Shape::Oriented(rect) => rect.intersects_aabb(target),
        }
    }
}

/// Behavior every projectile kind provides.
pub trait Flight {
    fn kind(&self) -> ProjectileKind;

    fn faction(&self) -> Faction {
        Faction::Hostile
    }

    fn tile_response(&self) -> TileResponse;

    fn damage(&self) -> u32;

    /// Advances one tick: movement, lifetime, animation, culling.
    fn update(&mut self, env: &ProjectileEnv);

    fn shape(&self) -> Shape;

    fn position(&self) -> Vec2;

    /// Eligible for removal at the next sweep.
    fn is_dead(&self) -> bool;

    /// Still able to apply damage this tick.
    fn is_armed(&self) -> bool;

    /// Latches after a hit was accepted.
    fn land_hit(&mut self);

    /// Reacts to overlapping a solid cell according to [`Flight::tile_response`].
    fn hit_tile(&mut self);

    /// Animation id and frame for the renderer.
    fn anim(&self) -> (&'static str, u16) {
        ("fly", 0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Projectile {
    Arrow(Arrow),
    Fireball(Fireball),
    LaserBolt(LaserBolt),
    ArmShard(ArmShard),
    Bullet(Bullet),
}

impl Projectile {
    fn flight(&self) -> &dyn Flight {
        match self {
            Projectile::Arrow(p) => p,
            Projectile::Fireball(p) => p,
            Projectile::LaserBolt(p) => p,
            Projectile::ArmShard(p) => p,
            Projectile::Bullet(p) => p,
        }
    }

    fn flight_mut(&mut self) -> &mut dyn Flight {
        match self {
            Projectile::Arrow(p) => p,
            Projectile::Fireball(p) => p,
            Projectile::LaserBolt(p) => p,
            Projectile::ArmShard(p) => p,
            Projectile::Bullet(p) => p,
        }
    }

    pub fn kind(&self) -> ProjectileKind {
        self.flight().kind()
    }

    pub fn faction(&self) -> Faction {
        self.flight().faction()
    }

    pub fn tile_response(&self) -> TileResponse {
        self.flight().tile_response()
    }

    pub fn damage(&self) -> u32 {
        self.flight().damage()
    }

    pub fn update(&mut self, env: &ProjectileEnv) {
        if !self.is_dead() {
            self.flight_mut().update(env);
        }
    }

    pub fn shape(&self) -> Shape {
        self.flight().shape()
    }

    pub fn bounds(&self) -> Aabb {
        self.shape().bounds()
    }

    pub fn overlaps(&self, target: &Aabb) -> bool {
        self.shape().overlaps(target)
    }

    pub fn position(&self) -> Vec2 {
        self.flight().position()
    }

    pub fn velocity(&self) -> Vec2 {
        match self {
            Projectile::Arrow(p) => p.velocity(),
            Projectile::Fireball(p) => p.velocity(),
            Projectile::LaserBolt(p) => p.velocity(),
            Projectile::ArmShard(p) => p.velocity(),
            Projectile::Bullet(p) => p.velocity(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.flight().is_dead()
    }

    /// Armed and overlapping `target`.
    pub fn touches(&self, target: &Aabb) -> bool {
        let flight = self.flight();
        !flight.is_dead() && flight.is_armed() && flight.shape().overlaps(target)
    }

    pub fn land_hit(&mut self) {
        self.flight_mut().land_hit();
    }

    /// Applies the tile policy when the projectile overlaps solid ground.
    /// Returns true when something changed.
    pub fn hit_tile(&mut self) -> bool {
        if self.is_dead() || !self.flight().is_armed() {
            return false;
        }
        if self.tile_response() == TileResponse::Pierce {
            return false;
        }
        self.flight_mut().hit_tile();
        true
    }

    pub fn anim(&self) -> (&'static str, u16) {
        self.flight().anim()
    }
}

/// Wraps an angle into `[-PI, PI]`.
pub(crate) fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}
