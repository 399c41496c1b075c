use super::{Flight, ProjectileEnv, ProjectileKind, Shape, TileResponse, wrap_angle};
use crate::config::ArmShardConfig;
use crate::geometry::{OrientedRect, Vec2};

/// Flight phase of an [`ArmShard`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShardPhase {
    /// Straight flight before the target is chosen.
    Tell,
    /// Turning toward a point captured once when the tell ended.
    Homing { target: Vec2, approaching: bool },
    /// Arrived at or passed the target; straight flight until expiry.
    Cruise,
}

/// The boss's thrown arm.
///
/// It never tracks the player continuously: the player's position is read
/// exactly once, on the tick the tell delay runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct ArmShard {
    center: Vec2,
    velocity: Vec2,
    speed: f32,
    half_length: f32,
    half_thickness: f32,
    damage: u32,
    age: u32,
    lifetime: u32,
    redirect_delay: u32,
    max_turn: f32,
    arrive_radius: f32,
    phase: ShardPhase,
    spent: bool,
    dead: bool,
}

impl ArmShard {
    /// `origin` is the tail end; the shard extends ahead of it in `direction`.
    pub fn new(origin: Vec2, direction: f32, config: &ArmShardConfig) -> Self {
        let direction = if direction < 0.0 { -1.0 } else { 1.0 };
        let half_length = config.length * 0.5;
        Self {
            center: Vec2::new(origin.x + direction * half_length, origin.y),
            velocity: Vec2::new(config.speed * direction, 0.0),
            speed: config.speed,
            half_length,
            half_thickness: config.thickness * 0.5,
            damage: config.damage,
            age: 0,
            lifetime: config.lifetime_ticks,
            redirect_delay: config.redirect_delay,
            max_turn: config.max_turn_deg.to_radians(),
            arrive_radius: config.arrive_radius,
            phase: ShardPhase::Tell,
            spent: false,
            dead: false,
        }
    }

    pub fn phase(&self) -> ShardPhase {
        self.phase
    }

    /// Point the shard steers toward, once captured.
    pub fn locked_target(&self) -> Option<Vec2> {
        match self.phase {
            ShardPhase::Homing { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn steer(&mut self, target: Vec2, approaching: bool) -> ShardPhase {
        let to_target = target - self.center;
        if to_target.length() <= self.arrive_radius {
            return ShardPhase::Cruise;
        }
        let ahead = to_target.dot(self.velocity) > 0.0;
        if approaching && !ahead {
            return ShardPhase::Cruise;
        }
        let heading = self.velocity.angle();
        let turn = wrap_angle(to_target.angle() - heading).clamp(-self.max_turn, self.max_turn);
        self.velocity = Vec2::from_angle(heading + turn, self.speed);
        ShardPhase::Homing {
            target,
            approaching: approaching || ahead,
        }
    }
}

impl Flight for ArmShard {
    fn kind(&self) -> ProjectileKind {
        ProjectileKind::ArmShard
    }

    fn tile_response(&self) -> TileResponse {
        TileResponse::Pierce
    }

    fn damage(&self) -> u32 {
        self.damage
    }

    fn update(&mut self, env: &ProjectileEnv) {
        self.age += 1;
        match self.phase {
            // Capture only; steering starts next tick.
            ShardPhase::Tell if self.age >= self.redirect_delay => {
                self.phase = ShardPhase::Homing {
                    target: env.target,
                    approaching: false,
                };
            }
            ShardPhase::Homing {
                target,
                approaching,
            } => self.phase = self.steer(target, approaching),
            ShardPhase::Tell | ShardPhase::Cruise => {}
        }

        self.center = self.center + self.velocity;
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

    fn env(target: Vec2) -> ProjectileEnv {
        ProjectileEnv {
            world_width: 16_000.0,
            world_height: 640.0,
            cull_margin: 512.0,
            target,
        }
    }

    #[test]
    fn flies_straight_during_tell() {
        let config = ArmShardConfig::default();
        let mut shard = ArmShard::new(Vec2::new(1000.0, 300.0), 1.0, &config);
        for _ in 0..config.redirect_delay - 1 {
            shard.update(&env(Vec2::new(1000.0, 0.0)));
        }
        assert_eq!(shard.phase(), ShardPhase::Tell);
        assert_eq!(shard.velocity(), Vec2::new(config.speed, 0.0));
    }

    #[test]
    fn lock_tick_still_flies_straight() {
        let config = ArmShardConfig::default();
        let mut shard = ArmShard::new(Vec2::new(1000.0, 300.0), 1.0, &config);
        let above = Vec2::new(1500.0, -2000.0);
        for _ in 0..config.redirect_delay {
            shard.update(&env(above));
        }
        assert_eq!(shard.locked_target(), Some(above));
        assert_eq!(shard.velocity(), Vec2::new(config.speed, 0.0));

        shard.update(&env(above));
        assert!(shard.velocity().y < 0.0);
    }

    #[test]
    fn turn_rate_is_capped() {
        let config = ArmShardConfig::default();
        let mut shard = ArmShard::new(Vec2::new(1000.0, 300.0), 1.0, &config);
        let above = Vec2::new(1500.0, -2000.0);
        for _ in 0..=config.redirect_delay {
            shard.update(&env(above));
        }
        let angle = shard.velocity().angle();
        assert!((angle.abs() - config.max_turn_deg.to_radians()).abs() < 1e-4);
        assert!((shard.velocity().length() - config.speed).abs() < 1e-3);
    }

    #[test]
    fn arrival_switches_to_cruise() {
        let config = ArmShardConfig::default();
        let mut shard = ArmShard::new(Vec2::new(0.0, 300.0), 1.0, &config);
        let ahead = Vec2::new(config.length * 0.5 + config.speed * 40.0, 300.0);
        for _ in 0..80 {
            shard.update(&env(ahead));
        }
        assert_eq!(shard.phase(), ShardPhase::Cruise);
        assert!(!shard.is_dead());
    }
}
