//! Chase-and-attack AI shared by every regular enemy.
//!
//! Skeleton, Goblin, Witch and Grunt run the same template; they differ only
//! in the [`EnemyConfig`] tunables their [`EnemyKind`] selects: detection
//! zones, speeds, standoff distance and the kind of attack.

use super::{Combatant, EnemyKind, Facing, Life, front_box};
use crate::anim::{Animator, Clip};
use crate::combat::{Health, HitResult};
use crate::config::{EnemyAttack, EnemyConfig, GameConfig, Zone};
use crate::env::TileMap;
use crate::geometry::{Aabb, Vec2};
use crate::physics::{Body, PhysicsBody};
use crate::projectile::{Bullet, Fireball, Projectile};
use crate::state::EntityId;

/// Hysteresis around the standoff distance.
const STANDOFF_SLACK: f32 = 24.0;

/// Height of the sensing origin as a fraction of body height from the top.
const SENSE_HEIGHT: f32 = 0.55;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum EnemyAnim {
    Idle,
    Walk,
    Attack,
    Hurt,
    Death,
}

/// A melee swing released at the attack keyframe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStrike {
    pub hitbox: Aabb,
    pub damage: u32,
}

/// Read-only inputs for one enemy tick.
#[derive(Clone, Copy)]
pub struct EnemyContext<'a> {
    pub config: &'a GameConfig,
    pub map: &'a TileMap,
    pub player: Aabb,
    pub player_alive: bool,
}

/// What an enemy produced during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyUpdate {
    pub attack_started: bool,
    pub strike: Option<EnemyStrike>,
    pub projectile: Option<Projectile>,
    /// Death animation finished this tick.
    pub gone: bool,
}

impl Zone {
    /// Tests `target` against this zone as seen from `body` looking `facing`.
    pub fn contains(&self, body: &Aabb, facing: Facing, target: &Aabb) -> bool {
        let sense_y = body.top + body.height() * SENSE_HEIGHT;
        let center_x = body.center().x;
        match *self {
            Zone::Forward { reach, half_height } => {
                let origin = Aabb::new(center_x, body.top, center_x, body.bottom);
                front_box(&origin, facing, reach, sense_y, half_height).overlaps(target)
            }
            Zone::Radius { rx, ry } => {
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let c = target.center();
                let dx = (c.x - center_x) / rx;
                let dy = (c.y - sense_y) / ry;
                dx * dx + dy * dy <= 1.0
            }
        }
    }

    /// Like [`Zone::contains`] but ignores facing.
    pub fn surrounds(&self, body: &Aabb, target: &Aabb) -> bool {
        match self {
            Zone::Forward { .. } => {
                self.contains(body, Facing::Left, target) || self.contains(body, Facing::Right, target)
            }
            Zone::Radius { .. } => self.contains(body, Facing::Right, target),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    body: Body,
    facing: Facing,
    health: Health,
    anim: Animator<EnemyAnim>,
    life: Life,
    cooldown: u32,
    invulnerable: u32,
    hurt_iframes: u32,
    attack_ticks: u32,
    attack_released: bool,
    patrol: Facing,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, foot: Vec2, config: &GameConfig) -> Self {
        let tuning = kind.tuning(config);
        Self {
            id,
            kind,
            body: Body::standing_at(foot, tuning.width, tuning.height),
            facing: Facing::Left,
            health: Health::full(tuning.max_hp),
            anim: Animator::new(EnemyAnim::Idle),
            life: Life::Alive,
            cooldown: 0,
            invulnerable: 0,
            hurt_iframes: tuning.hurt_iframes,
            attack_ticks: 0,
            attack_released: false,
            patrol: Facing::Left,
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn anim(&self) -> EnemyAnim {
        self.anim.state()
    }

    pub fn frame(&self) -> u16 {
        self.anim.frame()
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_ticks > 0
    }

    fn clip(tuning: &EnemyConfig, anim: EnemyAnim) -> Clip {
        match anim {
            EnemyAnim::Idle => tuning.clips.idle,
            EnemyAnim::Walk => tuning.clips.walk,
            EnemyAnim::Attack => tuning.clips.attack,
            EnemyAnim::Hurt => tuning.clips.hurt,
            EnemyAnim::Death => tuning.clips.death,
        }
    }

    fn integrate(&mut self, ctx: &EnemyContext<'_>) -> crate::physics::Contacts {
        let world = &ctx.config.world;
        self.body.apply_gravity(world.gravity, world.max_fall_speed);
        ctx.map.resolve_move(&mut self.body)
    }

    fn face_toward(&mut self, x: f32) {
        let dx = x - self.body.center().x;
        if dx.abs() > 2.0 {
            self.facing = Facing::from_sign(dx).unwrap_or(self.facing);
        }
    }

    pub fn update(&mut self, ctx: &EnemyContext<'_>) -> EnemyUpdate {
        let mut out = EnemyUpdate::default();
        let tuning = self.kind.tuning(ctx.config);

        match self.life {
            Life::Gone => return out,
            Life::Dying => {
                self.body.vx = 0.0;
                self.integrate(ctx);
                self.anim.advance(&tuning.clips.death);
                if self.anim.finished(&tuning.clips.death) {
                    self.life = Life::Gone;
                    out.gone = true;
                }
                return out;
            }
            Life::Alive => {}
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        self.invulnerable = self.invulnerable.saturating_sub(1);

        let me = self.body.bounds();
        let player_x = ctx.player.center().x;
        let hurt = self.anim.state() == EnemyAnim::Hurt && !self.anim.finished(&tuning.clips.hurt);
        let busy = self.attack_ticks > 0 || hurt;
        let notices = ctx.player_alive && tuning.vision.surrounds(&me, &ctx.player);

        if !busy && notices {
            self.face_toward(player_x);
        }
        if !busy
            && ctx.player_alive
            && self.cooldown == 0
            && tuning.attack_zone.contains(&me, self.facing, &ctx.player)
        {
            self.face_toward(player_x);
            self.attack_ticks = tuning.clips.attack.duration().max(1);
            self.attack_released = false;
            self.cooldown = tuning.attack_cooldown_ticks;
            self.anim.restart(EnemyAnim::Attack);
            out.attack_started = true;
        }

        let patrolling = self.steer(tuning, hurt, notices, player_x);
        let contacts = self.integrate(ctx);
        if patrolling && contacts.hit_wall() {
            self.patrol = self.patrol.flipped();
            self.facing = self.patrol;
        }

        let next = if self.attack_ticks > 0 {
            EnemyAnim::Attack
        } else if hurt {
            EnemyAnim::Hurt
        } else if self.body.vx.abs() > 0.05 || !self.body.grounded {
            EnemyAnim::Walk
        } else {
            EnemyAnim::Idle
        };
        self.anim.set(next);
        self.anim.advance(&Self::clip(tuning, next));

        if self.attack_ticks > 0 {
            self.attack_ticks -= 1;
            let keyframe = tuning.attack_keyframe.min(tuning.clips.attack.last_frame());
            if !self.attack_released && self.anim.frame() >= keyframe {
                self.attack_released = true;
                self.release_attack(tuning, ctx, &mut out);
            }
        }
        out
    }

    /// Sets `vx` for this tick. Returns true when the enemy is patrolling.
    fn steer(&mut self, tuning: &EnemyConfig, hurt: bool, notices: bool, player_x: f32) -> bool {
        if self.attack_ticks > 0 {
            self.body.vx *= tuning.attack_damping;
            return false;
        }
        if hurt {
            self.body.vx *= tuning.hurt_damping;
            return false;
        }
        if notices {
            let dx = player_x - self.body.center().x;
            let dist = dx.abs();
            let toward = dx.signum();
            let desired = if dist > tuning.standoff + STANDOFF_SLACK {
                tuning.max_speed * toward
            } else if dist < tuning.standoff - STANDOFF_SLACK {
                -tuning.max_speed * toward
            } else {
                0.0
            };
            if desired == 0.0 {
                self.body.vx *= tuning.friction;
            } else {
                self.body.steer_x(desired, tuning.accel, tuning.max_speed);
            }
            return false;
        }
        if tuning.patrol_speed > 0.0 {
            self.facing = self.patrol;
            self.body
                .steer_x(self.patrol.sign() * tuning.patrol_speed, tuning.accel, tuning.patrol_speed);
            return true;
        }
        self.body.vx *= tuning.friction;
        false
    }

    fn release_attack(&self, tuning: &EnemyConfig, ctx: &EnemyContext<'_>, out: &mut EnemyUpdate) {
        let me = self.body.bounds();
        let center = self.body.center();
        match tuning.attack {
            EnemyAttack::Melee {
                damage,
                reach,
                half_height,
            } => {
                let sense_y = me.top + me.height() * SENSE_HEIGHT;
                let origin = Aabb::new(center.x, me.top, center.x, me.bottom);
                out.strike = Some(EnemyStrike {
                    hitbox: front_box(&origin, self.facing, reach, sense_y, half_height),
                    damage,
                });
            }
            EnemyAttack::Fireball => {
                let hand = Vec2::new(center.x + self.facing.sign() * self.body.w * 0.5, center.y);
                out.projectile = Some(Projectile::Fireball(Fireball::new(
                    hand,
                    ctx.player.center(),
                    &ctx.config.projectiles.fireball,
                )));
            }
            EnemyAttack::Bullet => {
                out.projectile = Some(Projectile::Bullet(Bullet::new(
                    center,
                    self.facing.sign(),
                    &ctx.config.projectiles.bullet,
                )));
            }
        }
    }
}

impl PhysicsBody for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Combatant for Enemy {
    fn life(&self) -> Life {
        self.life
    }

    fn hurtbox(&self) -> Aabb {
        self.body.bounds()
    }

    fn is_vulnerable(&self) -> bool {
        self.life == Life::Alive && self.invulnerable == 0
    }

    fn hit(&mut self, damage: u32) -> HitResult {
        if !self.is_vulnerable() {
            return HitResult::Ignored;
        }
        let dealt = self.health.damage(damage);
        if self.health.is_depleted() {
            self.life = Life::Dying;
            self.attack_ticks = 0;
            self.body.vx = 0.0;
            self.anim.restart(EnemyAnim::Death);
            return HitResult::Killed { dealt };
        }
        self.invulnerable = self.hurt_iframes;
        if self.attack_ticks == 0 {
            self.anim.restart(EnemyAnim::Hurt);
        }
        HitResult::Hurt {
            dealt,
            remaining: self.health.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Cell;

    fn flat_map() -> TileMap {
        let mut map = TileMap::new(60, 12, 32, 6.0);
        for col in 0..60 {
            map.set(col, 10, Cell::Solid);
        }
        map
    }

    fn player_box(x: f32) -> Aabb {
        Aabb::from_xywh(x, 192.0, 40.0, 128.0)
    }

    fn ctx<'a>(config: &'a GameConfig, map: &'a TileMap, player: Aabb) -> EnemyContext<'a> {
        EnemyContext {
            config,
            map,
            player,
            player_alive: true,
        }
    }

    #[test]
    fn skeleton_swing_hits_once_per_activation() {
        let config = GameConfig::default();
        let map = flat_map();
        let mut skeleton = Enemy::new(EntityId(2), EnemyKind::Skeleton, Vec2::new(800.0, 320.0), &config);
        let player = player_box(700.0);

        let mut started = 0;
        let mut strikes = 0;
        for _ in 0..config.skeleton.clips.attack.duration() + 5 {
            let out = skeleton.update(&ctx(&config, &map, player));
            started += out.attack_started as u32;
            if let Some(strike) = out.strike {
                assert!(strike.hitbox.overlaps(&player));
                strikes += 1;
            }
        }
        assert_eq!(started, 1);
        assert_eq!(strikes, 1);
        assert_eq!(skeleton.facing(), Facing::Left);
    }

    #[test]
    fn attack_is_not_interrupted_by_damage() {
        let config = GameConfig::default();
        let map = flat_map();
        let mut goblin = Enemy::new(EntityId(2), EnemyKind::Goblin, Vec2::new(800.0, 320.0), &config);
        let player = player_box(730.0);
        let out = goblin.update(&ctx(&config, &map, player));
        assert!(out.attack_started);
        assert!(goblin.hit(5).landed());
        assert_eq!(goblin.anim(), EnemyAnim::Attack);
        goblin.update(&ctx(&config, &map, player));
        assert_eq!(goblin.anim(), EnemyAnim::Attack);
    }

    #[test]
    fn witch_aims_fireball_at_keyframe_snapshot() {
        let config = GameConfig::default();
        let map = flat_map();
        let mut witch = Enemy::new(EntityId(3), EnemyKind::Witch, Vec2::new(900.0, 320.0), &config);
        let mut player = player_box(600.0);
        let mut fired = None;
        for tick in 0..200 {
            if tick == 20 {
                player = player_box(650.0);
            }
            let out = witch.update(&ctx(&config, &map, player));
            if let Some(projectile) = out.projectile {
                fired = Some(projectile);
                break;
            }
        }
        let Some(Projectile::Fireball(fireball)) = fired else {
            panic!("witch never cast");
        };
        assert!(fireball.velocity().x < 0.0);
    }

    #[test]
    fn death_plays_out_before_gone() {
        let config = GameConfig::default();
        let map = flat_map();
        let mut grunt = Enemy::new(EntityId(4), EnemyKind::Grunt, Vec2::new(300.0, 320.0), &config);
        assert!(matches!(grunt.hit(100), HitResult::Killed { .. }));
        assert_eq!(grunt.hit(1), HitResult::Ignored);
        let far = player_box(1800.0);
        let death = config.grunt.clips.death;
        let mut ticks = 0;
        loop {
            let out = grunt.update(&ctx(&config, &map, far));
            ticks += 1;
            if out.gone {
                break;
            }
            assert_eq!(grunt.life(), Life::Dying);
            assert!(ticks < 1_000);
        }
        assert_eq!(ticks, death.last_frame() as u32 * death.ticks_per_frame as u32);
        assert_eq!(grunt.life(), Life::Gone);
    }

    #[test]
    fn grunt_patrol_turns_at_walls() {
        let config = GameConfig::default();
        let mut map = flat_map();
        for row in 0..10 {
            map.set(5, row, Cell::Solid);
        }
        let mut grunt = Enemy::new(EntityId(4), EnemyKind::Grunt, Vec2::new(260.0, 320.0), &config);
        let far = player_box(1800.0);
        for _ in 0..200 {
            grunt.update(&ctx(&config, &map, far));
        }
        assert_eq!(grunt.facing(), Facing::Right);
        assert!(grunt.body().x >= 192.0);
    }
}
