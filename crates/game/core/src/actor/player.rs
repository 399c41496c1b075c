//! The controllable archer.
//!
//! State priority, highest first: `Die` > `Hurt` > melee combo > bow attack >
//! locomotion inferred from `grounded` and the sign of `vy`.

use super::{Combatant, Facing, Life, front_box};
use crate::anim::{Animator, Clip};
use crate::combat::{Health, HitResult, Quiver};
use crate::config::{GameConfig, MeleeConfig, WorldConfig};
use crate::env::TileMap;
use crate::geometry::{Aabb, Vec2};
use crate::input::{InputFrame, Intent};
use crate::physics::{Body, PhysicsBody};
use crate::projectile::Arrow;
use crate::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PlayerAnim {
    Idle,
    Walk,
    Attack,
    Melee,
    Hurt,
    StartJump,
    Jump,
    StartFall,
    Fall,
    Land,
    Die,
}

/// One melee hit, emitted at most once per combo phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeleeStrike {
    pub hitbox: Aabb,
    pub damage: u32,
    pub phase: u8,
}

/// What the player produced during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerUpdate {
    pub arrow: Option<Arrow>,
    pub strike: Option<MeleeStrike>,
    /// Death animation finished this tick.
    pub gone: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Combo {
    phase: usize,
    ticks: u32,
    struck: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    body: Body,
    facing: Facing,
    health: Health,
    quiver: Quiver,
    anim: Animator<PlayerAnim>,
    life: Life,
    hurt_ticks: u32,
    hurt_timer: u32,
    attack_ticks: u32,
    arrow_released: bool,
    combo: Option<Combo>,
    melee_cooldown: u32,
}

impl Player {
    pub fn new(foot: Vec2, config: &GameConfig) -> Self {
        let pc = &config.player;
        Self {
            body: Body::standing_at(foot, pc.width, pc.height),
            facing: Facing::Right,
            health: Health::full(pc.max_hp),
            quiver: Quiver::new(&config.quiver),
            anim: Animator::new(PlayerAnim::Idle),
            life: Life::Alive,
            hurt_ticks: pc.hurt_ticks,
            hurt_timer: 0,
            attack_ticks: 0,
            arrow_released: false,
            combo: None,
            melee_cooldown: 0,
        }
    }

    pub fn reset(&mut self, foot: Vec2, config: &GameConfig) {
        *self = Self::new(foot, config);
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn quiver(&self) -> &Quiver {
        &self.quiver
    }

    pub fn anim(&self) -> PlayerAnim {
        self.anim.state()
    }

    pub fn frame(&self) -> u16 {
        self.anim.frame()
    }

    /// Index of the running combo phase, if swinging.
    pub fn combo_phase(&self) -> Option<usize> {
        self.combo.map(|combo| combo.phase)
    }

    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.life != Life::Alive {
            return 0;
        }
        self.health.heal(amount)
    }

    pub fn refill_arrows(&mut self, count: u8) -> u8 {
        self.quiver.refill(count)
    }

    fn clip(config: &GameConfig, anim: PlayerAnim) -> Clip {
        let clips = &config.player.clips;
        match anim {
            PlayerAnim::Idle => clips.idle,
            PlayerAnim::Walk => clips.walk,
            PlayerAnim::Attack => clips.attack,
            PlayerAnim::Melee => config.melee.clip,
            PlayerAnim::Hurt => clips.hurt,
            PlayerAnim::StartJump => clips.start_jump,
            PlayerAnim::Jump => clips.jump,
            PlayerAnim::StartFall => clips.start_fall,
            PlayerAnim::Fall => clips.fall,
            PlayerAnim::Land => clips.land,
            PlayerAnim::Die => clips.die,
        }
    }

    fn integrate(&mut self, map: &TileMap, world: &WorldConfig) {
        self.body.apply_gravity(world.gravity, world.max_fall_speed);
        map.resolve_move(&mut self.body);
    }

    /// Advances the player one tick.
    pub fn update(
        &mut self,
        input: &InputFrame,
        map: &TileMap,
        config: &GameConfig,
        state: &GameState,
    ) -> PlayerUpdate {
        let mut out = PlayerUpdate::default();
        let pc = &config.player;
        self.quiver.tick(state);

        match self.life {
            Life::Gone => return out,
            Life::Dying => {
                self.body.vx *= pc.friction;
                self.integrate(map, &config.world);
                self.anim.advance(&pc.clips.die);
                if self.anim.finished(&pc.clips.die) {
                    self.life = Life::Gone;
                    out.gone = true;
                }
                return out;
            }
            Life::Alive => {}
        }

        self.hurt_timer = self.hurt_timer.saturating_sub(1);
        self.melee_cooldown = self.melee_cooldown.saturating_sub(1);

        let dir = input.horizontal();
        if self.combo.is_some() {
            self.body.vx *= config.melee.move_damping;
        } else if dir != 0.0 {
            self.body.steer_x(dir * pc.max_speed, pc.accel, pc.max_speed);
        } else {
            self.body.vx *= pc.friction;
            if self.body.vx.abs() < 0.01 {
                self.body.vx = 0.0;
            }
        }

        if self.combo.is_none() {
            if let Some(facing) = Facing::from_sign(dir) {
                self.facing = facing;
            } else if self.body.vx.abs() > pc.facing_threshold {
                self.facing = Facing::from_sign(self.body.vx).unwrap_or(self.facing);
            }
        }

        let can_jump = self.body.grounded
            && self.combo.is_none()
            && self.hurt_timer == 0
            && self.anim.state() != PlayerAnim::Land;
        if input.pressed(Intent::JUMP) && can_jump {
            self.body.vy = -pc.jump_velocity;
            self.body.grounded = false;
        }

        let was_grounded = self.body.grounded;
        self.integrate(map, &config.world);

        if self.combo.is_some() {
            out.strike = self.step_combo(input, &config.melee);
        } else {
            self.attack_ticks = self.attack_ticks.saturating_sub(1);
            let free = self.hurt_timer == 0 && self.attack_ticks == 0;
            if free && input.pressed(Intent::MELEE) && self.melee_cooldown == 0 {
                out.strike = self.start_combo(&config.melee);
            } else if free && input.held(Intent::FIRE) && self.quiver.ammo() > 0 {
                self.attack_ticks = pc.clips.attack.duration();
                self.arrow_released = false;
                self.anim.restart(PlayerAnim::Attack);
            }
        }

        if self.combo.is_none() {
            let next = if self.hurt_timer > 0 {
                PlayerAnim::Hurt
            } else if self.attack_ticks > 0 {
                PlayerAnim::Attack
            } else {
                self.locomotion(dir, was_grounded, config)
            };
            self.anim.set(next);
            self.anim.advance(&Self::clip(config, next));
            out.arrow = self.release_arrow(config, state);
        }
        out
    }

    fn locomotion(&self, dir: f32, was_grounded: bool, config: &GameConfig) -> PlayerAnim {
        let pc = &config.player;
        let current = self.anim.state();
        let moving = self.body.vx.abs() > pc.walk_threshold;

        if self.body.grounded {
            if !was_grounded {
                return PlayerAnim::Land;
            }
            let walk_override = moving && dir != 0.0;
            if current == PlayerAnim::Land && !self.anim.finished(&pc.clips.land) && !walk_override
            {
                return PlayerAnim::Land;
            }
            return if moving {
                PlayerAnim::Walk
            } else {
                PlayerAnim::Idle
            };
        }

        if self.body.vy < 0.0 {
            match current {
                PlayerAnim::StartJump if !self.anim.finished(&pc.clips.start_jump) => {
                    PlayerAnim::StartJump
                }
                PlayerAnim::StartJump | PlayerAnim::Jump => PlayerAnim::Jump,
                _ => PlayerAnim::StartJump,
            }
        } else {
            match current {
                PlayerAnim::StartFall if !self.anim.finished(&pc.clips.start_fall) => {
                    PlayerAnim::StartFall
                }
                PlayerAnim::StartFall | PlayerAnim::Fall => PlayerAnim::Fall,
                _ => PlayerAnim::StartFall,
            }
        }
    }

    fn release_arrow(&mut self, config: &GameConfig, state: &GameState) -> Option<Arrow> {
        let pc = &config.player;
        if self.anim.state() != PlayerAnim::Attack
            || self.arrow_released
            || self.anim.frame() < pc.arrow_fire_frame
        {
            return None;
        }
        self.arrow_released = true;
        if !self.quiver.try_consume(state) {
            return None;
        }
        let origin = Vec2::new(
            self.body.center().x,
            self.body.y + self.body.h * pc.arrow_spawn_height,
        );
        Some(Arrow::new(
            origin,
            self.facing.sign(),
            &config.projectiles.arrow,
        ))
    }

    fn start_combo(&mut self, melee: &MeleeConfig) -> Option<MeleeStrike> {
        let first = melee.phases.first()?;
        self.attack_ticks = 0;
        self.combo = Some(Combo {
            phase: 0,
            ticks: 0,
            struck: false,
        });
        self.anim.restart(PlayerAnim::Melee);
        self.anim.seek(first.first_frame);
        self.try_strike(melee)
    }

    fn step_combo(&mut self, input: &InputFrame, melee: &MeleeConfig) -> Option<MeleeStrike> {
        let combo = self.combo.as_mut()?;
        let phase = melee.phases.get(combo.phase)?;
        combo.ticks += 1;
        let span = (phase.last_frame - phase.first_frame + 1) as u32
            * melee.clip.ticks_per_frame.max(1) as u32;

        if combo.ticks < span {
            self.anim.advance(&melee.clip);
        } else {
            let next = combo.phase + 1;
            match melee.phases.get(next) {
                Some(next_phase) if input.held(Intent::MELEE) => {
                    combo.phase = next;
                    combo.ticks = 0;
                    combo.struck = false;
                    self.anim.seek(next_phase.first_frame);
                }
                _ => {
                    self.combo = None;
                    self.melee_cooldown = melee.end_cooldown_ticks;
                    return None;
                }
            }
        }
        self.try_strike(melee)
    }

    fn try_strike(&mut self, melee: &MeleeConfig) -> Option<MeleeStrike> {
        let hitbox = self.melee_hitbox(melee);
        let frame = self.anim.frame();
        let combo = self.combo.as_mut()?;
        let phase = melee.phases.get(combo.phase)?;
        if combo.struck || !phase.is_damage_frame(frame) {
            return None;
        }
        combo.struck = true;
        Some(MeleeStrike {
            hitbox,
            damage: phase.damage,
            phase: combo.phase as u8,
        })
    }

    pub fn melee_hitbox(&self, melee: &MeleeConfig) -> Aabb {
        let bounds = self.body.bounds();
        let center_y = bounds.center().y;
        let half_h = self.body.h * melee.height_ratio * 0.5;
        front_box(&bounds, self.facing, melee.reach, center_y, half_h)
    }
}

impl PhysicsBody for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Combatant for Player {
    fn life(&self) -> Life {
        self.life
    }

    fn hurtbox(&self) -> Aabb {
        self.body.bounds()
    }

    fn is_vulnerable(&self) -> bool {
        self.life == Life::Alive && self.hurt_timer == 0
    }

    fn hit(&mut self, damage: u32) -> HitResult {
        if !self.is_vulnerable() {
            return HitResult::Ignored;
        }
        let dealt = self.health.damage(damage);
        self.combo = None;
        self.attack_ticks = 0;
        if self.health.is_depleted() {
            self.life = Life::Dying;
            self.hurt_timer = 0;
            self.anim.restart(PlayerAnim::Die);
            return HitResult::Killed { dealt };
        }
        self.hurt_timer = self.hurt_ticks;
        self.anim.restart(PlayerAnim::Hurt);
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
    use crate::input::InputTracker;

    fn flat_map() -> TileMap {
        let mut map = TileMap::new(40, 12, 32, 6.0);
        for col in 0..40 {
            map.set(col, 10, Cell::Solid);
        }
        map
    }

    fn spawn(config: &GameConfig) -> Player {
        Player::new(Vec2::new(320.0, 320.0), config)
    }

    fn run(
        player: &mut Player,
        tracker: &mut InputTracker,
        held: Intent,
        map: &TileMap,
        config: &GameConfig,
    ) -> PlayerUpdate {
        let frame = tracker.next(held);
        player.update(&frame, map, config, &GameState::new())
    }

    #[test]
    fn walks_and_faces_input() {
        let config = GameConfig::default();
        let map = flat_map();
        let mut player = spawn(&config);
        let mut tracker = InputTracker::default();
        for _ in 0..20 {
            run(&mut player, &mut tracker, Intent::MOVE_LEFT, &map, &config);
        }
        assert_eq!(player.facing(), Facing::Left);
        assert_eq!(player.anim(), PlayerAnim::Walk);
        assert_eq!(player.body().vx, -config.player.max_speed);
        assert!(player.body().grounded);
    }

    #[test]
    fn jump_is_edge_triggered() {
        let config = GameConfig::default();
        let map = flat_map();
        let mut player = spawn(&config);
        let mut tracker = InputTracker::default();
        for _ in 0..10 {
            run(&mut player, &mut tracker, Intent::empty(), &map, &config);
        }
        run(&mut player, &mut tracker, Intent::JUMP, &map, &config);
        assert!(player.body().vy < 0.0);
        assert_eq!(player.anim(), PlayerAnim::StartJump);

        // Holding jump after landing does not bounce again.
        for _ in 0..200 {
            run(&mut player, &mut tracker, Intent::JUMP, &map, &config);
        }
        assert!(player.body().grounded);
        assert_eq!(player.body().vy, 0.0);
    }

    #[test]
    fn bow_fires_once_per_cycle_at_keyframe() {
        let config = GameConfig::default();
        let map = flat_map();
        let mut player = spawn(&config);
        let mut tracker = InputTracker::default();
        run(&mut player, &mut tracker, Intent::empty(), &map, &config);

        let mut fired_at = Vec::new();
        for tick in 0..18 {
            let out = run(&mut player, &mut tracker, Intent::FIRE, &map, &config);
            if out.arrow.is_some() {
                fired_at.push(tick);
            }
        }
        assert_eq!(fired_at.len(), 2);
        assert_eq!(fired_at[1] - fired_at[0], config.player.clips.attack.duration());
        assert_eq!(player.quiver().ammo(), config.quiver.capacity - 2);
    }

    #[test]
    fn combo_strikes_once_per_phase_and_chains_while_held() {
        let config = GameConfig::default();
        let map = flat_map();
        let mut player = spawn(&config);
        let mut tracker = InputTracker::default();
        run(&mut player, &mut tracker, Intent::empty(), &map, &config);

        let mut phases = Vec::new();
        for _ in 0..60 {
            let out = run(&mut player, &mut tracker, Intent::MELEE, &map, &config);
            if let Some(strike) = out.strike {
                phases.push(strike.phase);
            }
        }
        assert_eq!(phases, vec![0, 1, 2]);
        assert_eq!(player.combo_phase(), None);
    }

    #[test]
    fn releasing_melee_ends_combo_at_boundary() {
        let config = GameConfig::default();
        let map = flat_map();
        let mut player = spawn(&config);
        let mut tracker = InputTracker::default();
        run(&mut player, &mut tracker, Intent::empty(), &map, &config);
        run(&mut player, &mut tracker, Intent::MELEE, &map, &config);

        let mut phases = Vec::new();
        for _ in 0..40 {
            let out = run(&mut player, &mut tracker, Intent::empty(), &map, &config);
            if let Some(strike) = out.strike {
                phases.push(strike.phase);
            }
        }
        assert_eq!(phases, vec![0]);
        assert_eq!(player.combo_phase(), None);
    }

    #[test]
    fn hurt_grants_invulnerability_and_death_is_terminal() {
        let config = GameConfig::default();
        let mut player = spawn(&config);
        assert!(matches!(player.hit(1), HitResult::Hurt { remaining: 2, .. }));
        assert_eq!(player.hit(1), HitResult::Ignored);
        assert_eq!(player.health().current, 2);

        player.hurt_timer = 0;
        player.hit(1);
        player.hurt_timer = 0;
        assert_eq!(player.hit(1), HitResult::Killed { dealt: 1 });
        assert_eq!(player.life(), Life::Dying);
        assert_eq!(player.hit(1), HitResult::Ignored);
        assert_eq!(player.health().current, 0);
    }
}
