//! The end-of-level boss.
//!
//! Two state machines are layered on one body. The outer [`Cutscene`] gate
//! decides whether the inner action machine runs at all; a frozen boss only
//! advances its pose animation. Under it, [`Presence`] tracks the summon
//! lifecycle and [`BossAction`] the combat behavior once active.

use super::enemy::EnemyStrike;
use super::{Combatant, Facing, Life};
use crate::anim::{Animator, Clip};
use crate::combat::{Armor, Health, HitResult};
use crate::config::{BossConfig, GameConfig};
use crate::env::{PcgRng, Rolls, TileMap};
use crate::event::{EventQueue, GameEvent};
use crate::geometry::{Aabb, Vec2};
use crate::physics::{Body, PhysicsBody};
use crate::projectile::{ArmShard, LaserBolt, Projectile};
use crate::state::EntityId;

/// Sensing center height as a fraction of body height from the top.
const CENTER_HEIGHT: f32 = 0.55;

/// Extra drop below the head anchor for the laser muzzle.
const MUZZLE_DROP: f32 = 30.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Presence {
    /// Rock pile: no AI, no damage.
    #[default]
    Dormant,
    /// Playing the appear strip backwards.
    Appearing,
    Active,
    Dying,
    Gone,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossAction {
    #[default]
    None,
    Chase,
    MeleeApproach,
    MeleeStrike,
    RangedWindup,
    RangedLoop,
    LaserCast,
    LaserBurst,
    ArmorBuff,
    Immune,
    Wait,
}

impl BossAction {
    /// Free states are the only ones that turn and pick a new action.
    pub fn is_free(self) -> bool {
        matches!(self, BossAction::None | BossAction::Chase)
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossAnim {
    Idle,
    Glow,
    Melee,
    Range,
    Laser,
    Armor,
    Immune,
    Hurt,
    Death,
    Appear,
}

/// Outer gate over the action machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cutscene {
    #[default]
    Active,
    /// Held pose; `remaining` counts down to an automatic release, `None`
    /// waits for the host.
    Frozen {
        pose: BossAnim,
        remaining: Option<u32>,
    },
}

/// Per-tick inputs for the boss.
#[derive(Clone, Copy)]
pub struct BossContext<'a> {
    pub config: &'a GameConfig,
    pub map: &'a TileMap,
    pub player: Aabb,
    pub player_alive: bool,
    /// Whether a thrown arm is still in flight.
    pub shard_alive: bool,
    pub tick: u64,
}

/// What the boss produced during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BossUpdate {
    pub strike: Option<EnemyStrike>,
    pub projectile: Option<Projectile>,
    /// Death animation finished this tick.
    pub gone: bool,
}

#[derive(Clone, Debug)]
pub struct Boss {
    body: Body,
    facing: Facing,
    health: Health,
    armor: Armor,
    anim: Animator<BossAnim>,
    presence: Presence,
    cutscene: Cutscene,
    action: BossAction,
    action_ticks: u32,
    cd_melee: u32,
    cd_range: u32,
    cd_laser: u32,
    attacks_since_rest: u32,
    wait_walk: bool,
    melee_struck: bool,
    shard_pending: bool,
    laser_left: u32,
    laser_delay: u32,
    loop_index: u16,
    loop_tick: u32,
    /// Length of the armor flash, captured from the clip at spawn.
    armor_flash_ticks: u32,
    events: EventQueue,
}

impl Boss {
    /// Places a dormant boss standing on `foot`.
    pub fn new(foot: Vec2, config: &GameConfig) -> Self {
        let bc = &config.boss;
        let mut anim = Animator::new(BossAnim::Death);
        anim.seek(bc.clips.death.last_frame());
        Self {
            body: Body::standing_at(foot, bc.width, bc.height),
            facing: Facing::Left,
            health: Health::full(bc.hp_max),
            armor: Armor::default(),
            anim,
            presence: Presence::Dormant,
            cutscene: Cutscene::Active,
            action: BossAction::None,
            action_ticks: 0,
            cd_melee: 0,
            cd_range: 0,
            cd_laser: 0,
            attacks_since_rest: 0,
            wait_walk: false,
            melee_struck: false,
            shard_pending: false,
            laser_left: 0,
            laser_delay: 0,
            loop_index: 0,
            loop_tick: 0,
            armor_flash_ticks: bc.clips.armor.duration().max(1),
            events: EventQueue::new(),
        }
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn action(&self) -> BossAction {
        self.action
    }

    pub fn cutscene(&self) -> Cutscene {
        self.cutscene
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.cutscene, Cutscene::Frozen { .. })
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn armor(&self) -> Armor {
        self.armor
    }

    pub fn anim(&self) -> BossAnim {
        self.anim.state()
    }

    pub fn frame(&self) -> u16 {
        self.anim.frame()
    }

    pub fn attacks_since_rest(&self) -> u32 {
        self.attacks_since_rest
    }

    /// Moves events raised since the last call into `queue`.
    pub fn drain_events_into(&mut self, queue: &mut EventQueue) {
        for event in self.events.drain() {
            queue.push(event);
        }
    }

    /// Freezes or releases the boss. Emits `BossCutscene` on change.
    pub fn set_cutscene(&mut self, cutscene: Cutscene) {
        let was_frozen = self.is_frozen();
        self.cutscene = cutscene;
        if let Cutscene::Frozen { .. } = cutscene {
            self.body.vx = 0.0;
        }
        let frozen = self.is_frozen();
        if frozen != was_frozen {
            self.events.push(GameEvent::BossCutscene { frozen });
        }
    }

    /// Starts the appearance. No-op unless dormant.
    pub fn trigger_summon(&mut self, config: &BossConfig) -> bool {
        if self.presence != Presence::Dormant {
            return false;
        }
        self.presence = Presence::Appearing;
        self.anim.restart(BossAnim::Appear);
        self.anim.seek(config.clips.appear.last_frame());
        self.events.push(GameEvent::BossAwakened);
        true
    }

    fn center(&self) -> Vec2 {
        Vec2::new(
            self.body.x + self.body.w * 0.5,
            self.body.y + self.body.h * CENTER_HEIGHT,
        )
    }

    /// Hitbox of the forward arm, mirrored by facing.
    pub fn arm_hitbox(&self, config: &BossConfig) -> Aabb {
        let c = self.center();
        let ax = c.x + self.facing.sign() * self.body.w * config.arm_forward;
        let ay = c.y + self.body.h * config.arm_offset_y;
        Aabb::from_center(
            Vec2::new(ax, ay),
            self.body.w * config.arm_half_w,
            self.body.h * config.arm_half_h,
        )
    }

    fn clip(config: &BossConfig, anim: BossAnim) -> Clip {
        let clips = &config.clips;
        match anim {
            BossAnim::Idle => clips.idle,
            BossAnim::Glow => clips.glow,
            BossAnim::Melee => clips.melee,
            BossAnim::Range => clips.range,
            BossAnim::Laser => clips.laser,
            BossAnim::Armor => clips.armor,
            BossAnim::Immune => clips.immune,
            BossAnim::Hurt => clips.hurt,
            BossAnim::Death => clips.death,
            BossAnim::Appear => clips.appear,
        }
    }

    fn integrate(&mut self, ctx: &BossContext<'_>) {
        let world = &ctx.config.world;
        self.body.apply_gravity(world.gravity, world.max_fall_speed);
        ctx.map.resolve_move(&mut self.body);
    }

    pub fn update(&mut self, ctx: &BossContext<'_>) -> BossUpdate {
        let mut out = BossUpdate::default();
        let bc = &ctx.config.boss;

        match self.presence {
            Presence::Gone => return out,
            Presence::Dormant => {
                let near = self.center().distance(ctx.player.center()) <= bc.summon_radius;
                if ctx.player_alive && near {
                    self.trigger_summon(bc);
                }
                return out;
            }
            _ => {}
        }

        // Death outranks the freeze.
        let frozen = match self.cutscene {
            Cutscene::Frozen { pose, remaining } if self.presence != Presence::Dying => {
                Some((pose, remaining))
            }
            _ => None,
        };
        if let Some((pose, remaining)) = frozen {
            self.body.vx = 0.0;
            self.integrate(ctx);
            self.hold_pose(bc, pose);
            match remaining {
                Some(n) if n <= 1 => self.set_cutscene(Cutscene::Active),
                Some(n) => {
                    self.cutscene = Cutscene::Frozen {
                        pose,
                        remaining: Some(n - 1),
                    }
                }
                None => {}
            }
            return out;
        }

        match self.presence {
            Presence::Appearing => {
                self.facing = if ctx.player.center().x >= self.center().x {
                    Facing::Right
                } else {
                    Facing::Left
                };
                if self.anim.rewind(&bc.clips.appear) {
                    self.finish_appearance(bc);
                }
            }
            Presence::Dying => {
                self.body.vx = 0.0;
                self.integrate(ctx);
                self.anim.advance(&bc.clips.death);
                if self.anim.finished(&bc.clips.death) {
                    self.presence = Presence::Gone;
                    out.gone = true;
                }
            }
            Presence::Active => self.think(ctx, &mut out),
            Presence::Dormant | Presence::Gone => {}
        }
        out
    }

    fn hold_pose(&mut self, config: &BossConfig, pose: BossAnim) {
        self.anim.set(pose);
        self.anim.advance(&Self::clip(config, pose));
    }

    /// Runs only the frozen pose's animation clock. Physics and the
    /// cutscene countdown stay stopped, as under a pause overlay.
    pub fn animate_frozen(&mut self, config: &BossConfig) {
        if self.presence == Presence::Dying {
            return;
        }
        if let Cutscene::Frozen { pose, .. } = self.cutscene {
            self.hold_pose(config, pose);
        }
    }

    fn finish_appearance(&mut self, config: &BossConfig) {
        self.presence = Presence::Active;
        self.start_immune(config.summon_immune_ticks);
        self.events.push(GameEvent::BossAppearanceDone);
        if config.cutscene_ticks > 0 {
            self.set_cutscene(Cutscene::Frozen {
                pose: BossAnim::Immune,
                remaining: Some(config.cutscene_ticks),
            });
        }
    }

    fn think(&mut self, ctx: &BossContext<'_>, out: &mut BossUpdate) {
        let bc = &ctx.config.boss;
        let rng = PcgRng;
        let mut rolls = Rolls::new(&rng, ctx.config.seed, ctx.tick, EntityId::BOSS.0);

        self.cd_melee = self.cd_melee.saturating_sub(1);
        self.cd_range = self.cd_range.saturating_sub(1);
        self.cd_laser = self.cd_laser.saturating_sub(1);

        let target = ctx.player.center();
        let dx = target.x - self.center().x;
        if self.action.is_free() && dx.abs() > 3.0 {
            self.facing = Facing::from_sign(dx).unwrap_or(self.facing);
        }
        if self.action.is_free() {
            self.select(ctx, &mut rolls);
        }

        match self.action {
            BossAction::None => {
                self.body.vx *= bc.friction;
                let hurt = self.anim.state() == BossAnim::Hurt && !self.anim.finished(&bc.clips.hurt);
                if !hurt {
                    self.anim.set(BossAnim::Idle);
                }
            }
            BossAction::Chase => {
                self.body.steer_x(bc.chase_max * dx.signum(), bc.accel, bc.chase_max);
                self.locomotion_anim();
            }
            BossAction::MeleeApproach => {
                let arm_dx = target.x - self.arm_hitbox(bc).center().x;
                self.body
                    .steer_x(bc.melee_dash_max * arm_dx.signum(), bc.melee_dash_accel, bc.melee_dash_max);
                self.anim.set(BossAnim::Glow);
                self.action_ticks = self.action_ticks.saturating_sub(1);
                if arm_dx.abs() <= bc.arm_align_tolerance || self.action_ticks == 0 {
                    self.body.vx = 0.0;
                    self.action = BossAction::MeleeStrike;
                    self.action_ticks = bc.clips.melee.duration();
                    self.melee_struck = false;
                    self.anim.restart(BossAnim::Melee);
                }
            }
            BossAction::MeleeStrike => {
                self.body.vx *= 0.85;
            }
            BossAction::RangedWindup => {
                self.body.vx *= 0.85;
                self.action_ticks = self.action_ticks.saturating_sub(1);
                if self.action_ticks == 0 {
                    self.action = BossAction::RangedLoop;
                    self.shard_pending = true;
                    self.anim.seek(bc.clips.range.last_frame());
                }
            }
            BossAction::RangedLoop => {
                self.body.vx *= 0.85;
                if self.shard_pending {
                    self.shard_pending = false;
                    let c = self.center();
                    let hand = Vec2::new(
                        c.x + self.facing.sign() * self.body.w * bc.shard_forward,
                        c.y - self.body.h * bc.shard_up,
                    );
                    out.projectile = Some(Projectile::ArmShard(ArmShard::new(
                        hand,
                        self.facing.sign(),
                        &ctx.config.projectiles.arm_shard,
                    )));
                    self.events.push(GameEvent::BossThrowArm);
                } else if !ctx.shard_alive {
                    self.end_action(bc, &mut rolls);
                }
            }
            BossAction::LaserCast => {
                self.body.vx *= 0.8;
                self.action_ticks = self.action_ticks.saturating_sub(1);
                if self.action_ticks == 0 {
                    self.action = BossAction::LaserBurst;
                    self.laser_delay = bc.laser_first_delay;
                    self.loop_index = 0;
                    self.loop_tick = 0;
                    self.anim.seek(self.laser_loop_base(bc));
                }
            }
            BossAction::LaserBurst => {
                self.body.vx *= 0.8;
                if self.laser_left == 0 {
                    self.events.push(GameEvent::BossLaserEnd);
                    self.end_action(bc, &mut rolls);
                } else if self.laser_delay > 0 {
                    self.laser_delay -= 1;
                } else {
                    let c = self.center();
                    let muzzle = Vec2::new(c.x, c.y + self.body.h * bc.head_offset_y + MUZZLE_DROP);
                    let chest = Vec2::new(target.x, target.y - ctx.player.height() * 0.15);
                    out.projectile = Some(Projectile::LaserBolt(LaserBolt::new(
                        muzzle,
                        chest,
                        &ctx.config.projectiles.laser,
                    )));
                    self.laser_left -= 1;
                    self.laser_delay = bc.laser_inter_delay;
                    self.events.push(GameEvent::BossLaserShot {
                        remaining: self.laser_left,
                    });
                }
            }
            BossAction::ArmorBuff => {
                self.body.vx *= 0.7;
                self.action_ticks = self.action_ticks.saturating_sub(1);
                if self.action_ticks == 0 {
                    self.events.push(GameEvent::BossArmorEnd);
                    self.end_action(bc, &mut rolls);
                }
            }
            BossAction::Immune => {
                self.body.vx *= 0.8;
                self.action_ticks = self.action_ticks.saturating_sub(1);
                if self.action_ticks == 0 {
                    self.end_action(bc, &mut rolls);
                }
            }
            BossAction::Wait => {
                if self.wait_walk {
                    self.body
                        .steer_x(bc.wait_walk_speed * self.facing.sign(), bc.accel, bc.walk_max);
                    self.locomotion_anim();
                } else {
                    self.body.vx *= bc.friction;
                    self.anim.set(BossAnim::Idle);
                }
                self.action_ticks = self.action_ticks.saturating_sub(1);
                if self.action_ticks == 0 {
                    self.end_action(bc, &mut rolls);
                }
            }
        }

        self.integrate(ctx);
        self.advance_anim(bc);

        if self.action == BossAction::MeleeStrike {
            let clip = bc.clips.melee;
            if !self.melee_struck
                && self.anim.frame() == bc.melee_hit_frame
                && self.anim.entering_frame(&clip)
            {
                self.melee_struck = true;
                self.events.push(GameEvent::BossMelee);
                out.strike = Some(EnemyStrike {
                    hitbox: self.arm_hitbox(bc),
                    damage: bc.melee_damage,
                });
            }
            self.action_ticks = self.action_ticks.saturating_sub(1);
            if self.action_ticks == 0 {
                self.end_action(bc, &mut rolls);
            }
        }
    }

    fn locomotion_anim(&mut self) {
        let pose = if self.body.vx.abs() > 0.05 {
            BossAnim::Glow
        } else {
            BossAnim::Idle
        };
        self.anim.set(pose);
    }

    fn laser_loop_base(&self, config: &BossConfig) -> u16 {
        config
            .clips
            .laser
            .frames
            .saturating_sub(config.laser_loop_frames.max(1))
    }

    fn advance_anim(&mut self, config: &BossConfig) {
        match self.action {
            // Held on the last windup frame until the arm comes back.
            BossAction::RangedLoop => {}
            BossAction::LaserBurst => {
                let clip = config.clips.laser;
                let len = config.laser_loop_frames.max(1).min(clip.frames.max(1));
                self.loop_tick = self.loop_tick.wrapping_add(1);
                if clip.ticks_per_frame > 0 && self.loop_tick % clip.ticks_per_frame as u32 == 0 {
                    self.loop_index = (self.loop_index + 1) % len;
                    self.anim.seek(self.laser_loop_base(config) + self.loop_index);
                }
            }
            _ => {
                let state = self.anim.state();
                self.anim.advance(&Self::clip(config, state));
            }
        }
    }

    fn select(&mut self, ctx: &BossContext<'_>, rolls: &mut Rolls<'_>) {
        let bc = &ctx.config.boss;
        let distance = self.center().distance(ctx.player.center());
        if !ctx.player_alive || distance > bc.sight_radius {
            if rolls.chance(50) {
                self.start_wait(bc, rolls, false);
            } else {
                self.action = BossAction::None;
            }
            return;
        }

        let in_range = distance <= bc.range_radius;
        let weights = [
            if self.cd_melee == 0 { bc.weights.melee } else { 0 },
            if in_range && self.cd_range == 0 { bc.weights.range } else { 0 },
            if in_range && self.cd_laser == 0 { bc.weights.laser } else { 0 },
            bc.weights.wait,
        ];
        match rolls.weighted(&weights) {
            Some(0) => {
                self.action = BossAction::MeleeApproach;
                self.cd_melee = bc.cooldown_melee;
                self.action_ticks = bc.melee_approach_timeout.max(1);
                let dx = ctx.player.center().x - self.center().x;
                self.facing = Facing::from_sign(dx).unwrap_or(self.facing);
            }
            Some(1) => {
                self.action = BossAction::RangedWindup;
                self.cd_range = bc.cooldown_range;
                self.action_ticks = bc.clips.range.duration().max(1);
                self.shard_pending = false;
                self.anim.restart(BossAnim::Range);
            }
            Some(2) => {
                self.action = BossAction::LaserCast;
                self.cd_laser = bc.cooldown_laser;
                self.action_ticks = bc.laser_windup_ticks.max(1);
                self.laser_left = bc.laser_burst;
                self.anim.restart(BossAnim::Laser);
                self.events.push(GameEvent::BossLaserStart);
            }
            Some(_) => self.start_wait(bc, rolls, false),
            None => self.action = BossAction::Chase,
        }
    }

    fn start_wait(&mut self, config: &BossConfig, rolls: &mut Rolls<'_>, forced: bool) {
        self.action = BossAction::Wait;
        let (min, max) = if forced {
            config.forced_rest_ticks
        } else {
            config.wait_ticks
        };
        self.action_ticks = rolls.range(min, max).max(1);
        self.wait_walk = !forced && rolls.chance(50);
        if forced {
            self.body.vx = 0.0;
        }
    }

    fn start_immune(&mut self, ticks: u32) {
        self.action = BossAction::Immune;
        self.action_ticks = ticks.max(1);
        self.anim.restart(BossAnim::Immune);
    }

    fn end_action(&mut self, config: &BossConfig, rolls: &mut Rolls<'_>) {
        let finished = self.action;
        self.action = BossAction::None;
        if matches!(
            finished,
            BossAction::MeleeStrike | BossAction::RangedLoop | BossAction::LaserBurst
        ) {
            self.attacks_since_rest += 1;
            if self.attacks_since_rest >= config.attacks_before_rest {
                self.attacks_since_rest = 0;
                self.start_wait(config, rolls, true);
            }
        }
    }
}

impl PhysicsBody for Boss {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Combatant for Boss {
    fn life(&self) -> Life {
        match self.presence {
            Presence::Dying => Life::Dying,
            Presence::Gone => Life::Gone,
            _ => Life::Alive,
        }
    }

    fn hurtbox(&self) -> Aabb {
        self.body.bounds()
    }

    fn is_vulnerable(&self) -> bool {
        self.presence == Presence::Active && self.action != BossAction::Immune
    }

    fn hit(&mut self, damage: u32) -> HitResult {
        if !self.is_vulnerable() {
            return HitResult::Ignored;
        }
        let hit = self.armor.strike(&mut self.health, damage);
        self.events.push(GameEvent::BossHurt {
            hp: self.health.current,
            damage: hit.dealt,
        });

        if self.health.is_depleted() {
            self.presence = Presence::Dying;
            self.action = BossAction::None;
            self.body.vx = 0.0;
            self.anim.restart(BossAnim::Death);
            self.events.push(GameEvent::BossDied);
            return HitResult::Killed { dealt: hit.dealt };
        }

        if let Some(stacks) = hit.new_stacks {
            if matches!(self.action, BossAction::LaserCast | BossAction::LaserBurst) {
                self.events.push(GameEvent::BossLaserEnd);
            }
            self.action = BossAction::ArmorBuff;
            self.action_ticks = self.armor_flash_ticks;
            self.anim.restart(BossAnim::Armor);
            self.events.push(GameEvent::BossArmorStart { stacks });
        } else if self.action.is_free() {
            self.anim.restart(BossAnim::Hurt);
        }
        HitResult::Hurt {
            dealt: hit.dealt,
            remaining: self.health.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BossWeights;
    use crate::env::Cell;

    fn arena() -> TileMap {
        let mut map = TileMap::new(80, 12, 32, 6.0);
        for col in 0..80 {
            map.set(col, 10, Cell::Solid);
        }
        map
    }

    fn player_at(x: f32) -> Aabb {
        Aabb::from_xywh(x, 192.0, 40.0, 128.0)
    }

    fn step(boss: &mut Boss, config: &GameConfig, map: &TileMap, player: Aabb, tick: u64) -> BossUpdate {
        boss.update(&BossContext {
            config,
            map,
            player,
            player_alive: true,
            shard_alive: false,
            tick,
        })
    }

    /// Runs the boss until it is active and out of its post-summon immunity.
    fn awaken(boss: &mut Boss, config: &GameConfig, map: &TileMap, player: Aabb) -> u64 {
        let mut tick = 0;
        while boss.presence() != Presence::Active || boss.action() == BossAction::Immune {
            step(boss, config, map, player, tick);
            tick += 1;
            assert!(tick < 2_000, "boss never woke up");
        }
        tick
    }

    fn drained(boss: &mut Boss) -> Vec<GameEvent> {
        let mut queue = EventQueue::new();
        boss.drain_events_into(&mut queue);
        queue.drain()
    }

    #[test]
    fn dormant_boss_wakes_on_proximity() {
        let config = GameConfig::default();
        let map = arena();
        let mut boss = Boss::new(Vec2::new(1000.0, 320.0), &config);
        assert_eq!(boss.anim(), BossAnim::Death);
        assert_eq!(boss.hit(50), HitResult::Ignored);

        step(&mut boss, &config, &map, player_at(100.0), 0);
        assert_eq!(boss.presence(), Presence::Dormant);

        step(&mut boss, &config, &map, player_at(600.0), 1);
        assert_eq!(boss.presence(), Presence::Appearing);
        assert_eq!(boss.frame(), config.boss.clips.appear.last_frame());
        assert_eq!(drained(&mut boss), vec![GameEvent::BossAwakened]);

        let appear = config.boss.clips.appear;
        let reverse_ticks = appear.last_frame() as u32 * appear.ticks_per_frame as u32;
        for tick in 0..reverse_ticks {
            step(&mut boss, &config, &map, player_at(600.0), 2 + tick as u64);
        }
        assert_eq!(boss.presence(), Presence::Active);
        assert_eq!(boss.action(), BossAction::Immune);
        assert_eq!(drained(&mut boss), vec![GameEvent::BossAppearanceDone]);
        assert_eq!(boss.hit(50), HitResult::Ignored);
    }

    #[test]
    fn armor_applies_from_the_next_hit() {
        let config = GameConfig::default();
        let map = arena();
        let mut boss = Boss::new(Vec2::new(1000.0, 320.0), &config);
        awaken(&mut boss, &config, &map, player_at(600.0));
        drained(&mut boss);

        // 600 -> 440 crosses 75%: full damage, then one stack.
        assert_eq!(boss.hit(160), HitResult::Hurt { dealt: 160, remaining: 440 });
        assert_eq!(boss.armor().stacks(), 1);
        assert_eq!(boss.action(), BossAction::ArmorBuff);
        let events = drained(&mut boss);
        assert!(events.contains(&GameEvent::BossArmorStart { stacks: 1 }));

        assert_eq!(boss.hit(100), HitResult::Hurt { dealt: 75, remaining: 365 });
    }

    #[test]
    fn frozen_boss_ignores_ai_but_takes_hits() {
        let config = GameConfig::default();
        let map = arena();
        let mut boss = Boss::new(Vec2::new(1000.0, 320.0), &config);
        let mut tick = awaken(&mut boss, &config, &map, player_at(600.0));
        drained(&mut boss);
        boss.set_cutscene(Cutscene::Frozen {
            pose: BossAnim::Idle,
            remaining: None,
        });
        let x = boss.body().x;
        for _ in 0..120 {
            step(&mut boss, &config, &map, player_at(600.0), tick);
            tick += 1;
        }
        assert_eq!(boss.body().x, x);
        assert_eq!(boss.action(), BossAction::None);
        assert_eq!(boss.anim(), BossAnim::Idle);
        assert_eq!(boss.hit(50), HitResult::Hurt { dealt: 50, remaining: 550 });
        assert_eq!(boss.action(), BossAction::None);
        assert!(boss.is_frozen());

        step(&mut boss, &config, &map, player_at(600.0), tick);
        assert_eq!(boss.anim(), BossAnim::Idle);
        assert_eq!(boss.body().x, x);

        boss.set_cutscene(Cutscene::Active);
        let events = drained(&mut boss);
        assert_eq!(
            events,
            vec![
                GameEvent::BossCutscene { frozen: true },
                GameEvent::BossHurt { hp: 550, damage: 50 },
                GameEvent::BossCutscene { frozen: false },
            ]
        );
    }

    #[test]
    fn boss_killed_while_frozen_still_dies() {
        let config = GameConfig::default();
        let map = arena();
        let mut boss = Boss::new(Vec2::new(1000.0, 320.0), &config);
        let mut tick = awaken(&mut boss, &config, &map, player_at(600.0));
        boss.set_cutscene(Cutscene::Frozen {
            pose: BossAnim::Idle,
            remaining: None,
        });
        assert!(matches!(boss.hit(10_000), HitResult::Killed { .. }));

        let mut gone = false;
        for _ in 0..config.boss.clips.death.duration() + 1 {
            gone |= step(&mut boss, &config, &map, player_at(600.0), tick).gone;
            tick += 1;
        }
        assert!(gone);
        assert_eq!(boss.presence(), Presence::Gone);
    }

    #[test]
    fn paused_freeze_only_runs_the_pose_clock() {
        let config = GameConfig::default();
        let map = arena();
        let mut boss = Boss::new(Vec2::new(1000.0, 320.0), &config);
        awaken(&mut boss, &config, &map, player_at(600.0));
        boss.set_cutscene(Cutscene::Frozen {
            pose: BossAnim::Immune,
            remaining: Some(2),
        });
        let y = boss.body().y;
        boss.body.vy = 3.0;
        for _ in 0..100 {
            boss.animate_frozen(&config.boss);
        }
        assert!(boss.is_frozen());
        assert_eq!(boss.anim(), BossAnim::Immune);
        assert_eq!(boss.body().y, y);
    }

    #[test]
    fn automatic_cutscene_releases_itself() {
        let mut config = GameConfig::default();
        config.boss.cutscene_ticks = 30;
        let map = arena();
        let mut boss = Boss::new(Vec2::new(1000.0, 320.0), &config);
        let mut tick = 0;
        while boss.presence() != Presence::Active {
            step(&mut boss, &config, &map, player_at(600.0), tick);
            tick += 1;
        }
        assert!(boss.is_frozen());
        for _ in 0..30 {
            step(&mut boss, &config, &map, player_at(600.0), tick);
            tick += 1;
        }
        assert!(!boss.is_frozen());
    }

    #[test]
    fn melee_dash_aligns_arm_before_striking() {
        let mut config = GameConfig::default();
        config.boss.weights = BossWeights {
            melee: 1,
            range: 0,
            laser: 0,
            wait: 0,
        };
        let map = arena();
        let player = player_at(600.0);
        let mut boss = Boss::new(Vec2::new(1000.0, 320.0), &config);
        let mut tick = awaken(&mut boss, &config, &map, player);

        let mut strike = None;
        for _ in 0..400 {
            let out = step(&mut boss, &config, &map, player, tick);
            tick += 1;
            if out.strike.is_some() {
                strike = out.strike;
                break;
            }
        }
        let strike = strike.expect("boss never swung");
        assert!(strike.hitbox.overlaps(&player));
        assert_eq!(boss.facing(), Facing::Left);
        assert!(drained(&mut boss).contains(&GameEvent::BossMelee));
    }

    #[test]
    fn tenth_attack_forces_a_rest() {
        let config = GameConfig::default();
        let mut boss = Boss::new(Vec2::new(1000.0, 320.0), &config);
        let rng = PcgRng;
        let mut rolls = Rolls::new(&rng, config.seed, 0, EntityId::BOSS.0);

        boss.action = BossAction::MeleeStrike;
        boss.attacks_since_rest = config.boss.attacks_before_rest - 1;
        boss.end_action(&config.boss, &mut rolls);

        assert_eq!(boss.action(), BossAction::Wait);
        assert!(!boss.wait_walk);
        assert_eq!(boss.attacks_since_rest(), 0);
        let (min, max) = config.boss.forced_rest_ticks;
        assert!((min..=max).contains(&boss.action_ticks));
    }

    #[test]
    fn laser_burst_fires_configured_count() {
        let mut config = GameConfig::default();
        config.boss.weights = BossWeights {
            melee: 0,
            range: 0,
            laser: 1,
            wait: 0,
        };
        let map = arena();
        let player = player_at(600.0);
        let mut boss = Boss::new(Vec2::new(1000.0, 320.0), &config);
        let mut tick = awaken(&mut boss, &config, &map, player);
        drained(&mut boss);

        let mut bolts = 0;
        for _ in 0..400 {
            let out = step(&mut boss, &config, &map, player, tick);
            tick += 1;
            if let Some(Projectile::LaserBolt(_)) = out.projectile {
                bolts += 1;
            }
            if boss.attacks_since_rest() == 1 {
                break;
            }
        }
        assert_eq!(bolts, config.boss.laser_burst);
        let events = drained(&mut boss);
        assert_eq!(events.first(), Some(&GameEvent::BossLaserStart));
        assert!(events.contains(&GameEvent::BossLaserShot { remaining: 0 }));
        assert!(events.contains(&GameEvent::BossLaserEnd));
    }
}
