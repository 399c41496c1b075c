//! Game configuration constants and tunable parameters.
//!
//! Every number the simulation uses lives here so that hosts can load a
//! tuning file instead of recompiling. Defaults reproduce the shipped game.

use arrayvec::ArrayVec;

use crate::anim::Clip;
use crate::env::MarkerAlphabet;
use crate::error::ConfigError;

/// Complete tuning set for one session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Base seed for every deterministic roll (boss decisions, wait lengths).
    pub seed: u64,
    pub world: WorldConfig,
    pub markers: MarkerAlphabet,
    pub player: PlayerConfig,
    pub quiver: QuiverConfig,
    pub melee: MeleeConfig,
    pub skeleton: EnemyConfig,
    pub goblin: EnemyConfig,
    pub witch: EnemyConfig,
    pub grunt: EnemyConfig,
    pub boss: BossConfig,
    pub projectiles: ProjectileConfig,
    pub pickups: PickupConfig,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ENEMIES: usize = 128;
    pub const MAX_PROJECTILES: usize = 256;
    pub const MAX_PICKUPS: usize = 64;
    pub const MAX_QUIVER_CAPACITY: usize = 16;
    pub const MAX_MELEE_PHASES: usize = 4;
    pub const MAX_DAMAGE_FRAMES: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5eed_f00d;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            world: WorldConfig::default(),
            markers: MarkerAlphabet::default(),
            player: PlayerConfig::default(),
            quiver: QuiverConfig::default(),
            melee: MeleeConfig::default(),
            skeleton: EnemyConfig::skeleton(),
            goblin: EnemyConfig::goblin(),
            witch: EnemyConfig::witch(),
            grunt: EnemyConfig::grunt(),
            boss: BossConfig::default(),
            projectiles: ProjectileConfig::default(),
            pickups: PickupConfig::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.world.cols == 0 || self.world.rows == 0 {
            return Err(ConfigError::EmptyWorld {
                cols: self.world.cols,
                rows: self.world.rows,
            });
        }
        let capacity = self.quiver.capacity as usize;
        if capacity == 0 || capacity > Self::MAX_QUIVER_CAPACITY {
            return Err(ConfigError::QuiverCapacity {
                capacity: self.quiver.capacity,
                max: Self::MAX_QUIVER_CAPACITY,
            });
        }
        if self.melee.phases.is_empty() {
            return Err(ConfigError::EmptyMeleeCombo);
        }
        for (index, phase) in self.melee.phases.iter().enumerate() {
            if phase.first_frame > phase.last_frame || phase.last_frame >= self.melee.clip.frames {
                return Err(ConfigError::MeleePhaseFrames {
                    phase: index,
                    first: phase.first_frame,
                    last: phase.last_frame,
                    frames: self.melee.clip.frames,
                });
            }
        }
        let weights = &self.boss.weights;
        if weights.melee + weights.range + weights.laser + weights.wait == 0 {
            return Err(ConfigError::ZeroBossWeights);
        }
        if self.boss.hp_max == 0 {
            return Err(ConfigError::ZeroHealth { actor: "boss" });
        }
        if self.player.max_hp == 0 {
            return Err(ConfigError::ZeroHealth { actor: "player" });
        }
        self.validate_clips()
    }

    fn validate_clips(&self) -> Result<(), ConfigError> {
        let player = &self.player.clips;
        let boss = &self.boss.clips;
        let fireball = &self.projectiles.fireball;
        let mut clips = vec![
            ("player", "idle", &player.idle),
            ("player", "walk", &player.walk),
            ("player", "attack", &player.attack),
            ("player", "hurt", &player.hurt),
            ("player", "start_jump", &player.start_jump),
            ("player", "jump", &player.jump),
            ("player", "start_fall", &player.start_fall),
            ("player", "fall", &player.fall),
            ("player", "land", &player.land),
            ("player", "die", &player.die),
            ("melee", "clip", &self.melee.clip),
            ("boss", "idle", &boss.idle),
            ("boss", "glow", &boss.glow),
            ("boss", "melee", &boss.melee),
            ("boss", "range", &boss.range),
            ("boss", "laser", &boss.laser),
            ("boss", "armor", &boss.armor),
            ("boss", "immune", &boss.immune),
            ("boss", "hurt", &boss.hurt),
            ("boss", "death", &boss.death),
            ("boss", "appear", &boss.appear),
            ("fireball", "fly", &fireball.fly),
            ("fireball", "explode", &fireball.explode),
        ];
        for (actor, enemy) in [
            ("skeleton", &self.skeleton),
            ("goblin", &self.goblin),
            ("witch", &self.witch),
            ("grunt", &self.grunt),
        ] {
            let c = &enemy.clips;
            clips.extend([
                (actor, "idle", &c.idle),
                (actor, "walk", &c.walk),
                (actor, "attack", &c.attack),
                (actor, "hurt", &c.hurt),
                (actor, "death", &c.death),
            ]);
        }
        match clips.into_iter().find(|(_, _, clip)| !clip.is_playable()) {
            Some((actor, clip, _)) => Err(ConfigError::InvalidClip { actor, clip }),
            None => Ok(()),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// World dimensions and global physics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    pub cols: u32,
    pub rows: u32,
    /// Edge length of a cell in pixels.
    pub tile_size: u32,
    /// Added to `vy` every tick.
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Height of the landing band on top of a one-way cell.
    pub one_way_band: f32,
    pub tick_rate_hz: u32,
    /// Distance outside the world at which projectiles are culled.
    pub cull_margin: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cols: 500,
            rows: 20,
            tile_size: 32,
            gravity: 0.5,
            max_fall_speed: 16.0,
            one_way_band: 6.0,
            tick_rate_hz: 60,
            cull_margin: 64.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub max_hp: u32,
    pub accel: f32,
    pub max_speed: f32,
    /// Multiplier applied to `vx` when no direction is held.
    pub friction: f32,
    pub jump_velocity: f32,
    /// Invulnerable hurt window after a hit.
    pub hurt_ticks: u32,
    /// `|vx|` above which the player counts as walking.
    pub walk_threshold: f32,
    /// `|vx|` above which facing follows velocity.
    pub facing_threshold: f32,
    pub arrow_fire_frame: u16,
    /// Arrow spawn height as a fraction of body height from the top.
    pub arrow_spawn_height: f32,
    pub clips: PlayerClips,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 128.0,
            max_hp: 3,
            accel: 0.8,
            max_speed: 6.5,
            friction: 0.8,
            jump_velocity: 17.0,
            hurt_ticks: 15,
            walk_threshold: 0.12,
            facing_threshold: 0.05,
            arrow_fire_frame: 7,
            arrow_spawn_height: 0.47,
            clips: PlayerClips::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerClips {
    pub idle: Clip,
    pub walk: Clip,
    pub attack: Clip,
    pub hurt: Clip,
    pub start_jump: Clip,
    pub jump: Clip,
    pub start_fall: Clip,
    pub fall: Clip,
    pub land: Clip,
    pub die: Clip,
}

impl Default for PlayerClips {
    fn default() -> Self {
        Self {
            idle: Clip::looping(7, 2),
            walk: Clip::looping(8, 2),
            attack: Clip::once(9, 1),
            hurt: Clip::once(4, 2),
            start_jump: Clip::once(2, 3),
            jump: Clip::looping(2, 4),
            start_fall: Clip::once(2, 3),
            fall: Clip::looping(2, 4),
            land: Clip::once(3, 3),
            die: Clip::once(6, 6),
        }
    }
}

/// Ammo economy for the bow.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuiverConfig {
    pub capacity: u8,
    /// Ticks before one spent arrow returns.
    pub reload_ticks: u32,
}

impl Default for QuiverConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            reload_ticks: 60,
        }
    }
}

/// One step of the melee combo.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeleePhase {
    pub first_frame: u16,
    pub last_frame: u16,
    pub damage_frames: ArrayVec<u16, { GameConfig::MAX_DAMAGE_FRAMES }>,
    pub damage: u32,
}

impl MeleePhase {
    pub fn new(first_frame: u16, last_frame: u16, damage_frames: &[u16], damage: u32) -> Self {
        Self {
            first_frame,
            last_frame,
            damage_frames: damage_frames
                .iter()
                .copied()
                .take(GameConfig::MAX_DAMAGE_FRAMES)
                .collect(),
            damage,
        }
    }

    pub fn is_damage_frame(&self, frame: u16) -> bool {
        self.damage_frames.contains(&frame)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeleeConfig {
    /// Strip shared by every phase; phases address frame ranges inside it.
    pub clip: Clip,
    pub phases: ArrayVec<MeleePhase, { GameConfig::MAX_MELEE_PHASES }>,
    /// Cooldown after the combo ends before melee can start again.
    pub end_cooldown_ticks: u32,
    /// Hitbox reach in front of the body.
    pub reach: f32,
    /// Hitbox height as a fraction of body height, centered vertically.
    pub height_ratio: f32,
    /// `vx` multiplier while swinging.
    pub move_damping: f32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        let mut phases = ArrayVec::new();
        phases.push(MeleePhase::new(0, 5, &[3], 8));
        phases.push(MeleePhase::new(6, 11, &[8, 9], 8));
        phases.push(MeleePhase::new(12, 19, &[16], 14));
        Self {
            clip: Clip::once(20, 2),
            phases,
            end_cooldown_ticks: 12,
            reach: 56.0,
            height_ratio: 0.5,
            move_damping: 0.6,
        }
    }
}

/// Region relative to an enemy in which the player is detected.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Zone {
    /// Rectangle extending `reach` px ahead of the facing edge and
    /// `half_height` px above and below the body center.
    Forward { reach: f32, half_height: f32 },
    /// Ellipse around the body center.
    Radius { rx: f32, ry: f32 },
}

/// How an enemy hurts the player.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnemyAttack {
    /// Swing hitbox in front of the body.
    Melee {
        damage: u32,
        reach: f32,
        half_height: f32,
    },
    /// Aimed fireball released at the keyframe.
    Fireball,
    /// Straight horizontal bullet released at the keyframe.
    Bullet,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub max_hp: u32,
    pub max_speed: f32,
    pub accel: f32,
    pub friction: f32,
    /// Preferred horizontal distance kept from the player while chasing.
    pub standoff: f32,
    /// Speed while wandering without a target; zero holds position.
    pub patrol_speed: f32,
    pub vision: Zone,
    pub attack_zone: Zone,
    pub attack: EnemyAttack,
    pub attack_cooldown_ticks: u32,
    /// Frame at which the attack lands or the projectile leaves.
    pub attack_keyframe: u16,
    pub hurt_iframes: u32,
    pub hurt_damping: f32,
    pub attack_damping: f32,
    pub score: u64,
    pub clips: EnemyClips,
}

impl EnemyConfig {
    pub fn skeleton() -> Self {
        Self {
            width: 48.0,
            height: 96.0,
            max_hp: 40,
            max_speed: 3.0,
            accel: 0.07,
            friction: 0.3,
            standoff: 120.0,
            patrol_speed: 0.0,
            vision: Zone::Forward {
                reach: 800.0,
                half_height: 96.0 * 0.35,
            },
            attack_zone: Zone::Forward {
                reach: 120.0,
                half_height: 80.0,
            },
            attack: EnemyAttack::Melee {
                damage: 1,
                reach: 72.0,
                half_height: 40.0,
            },
            attack_cooldown_ticks: 180,
            attack_keyframe: 7,
            hurt_iframes: 10,
            hurt_damping: 0.85,
            attack_damping: 0.70,
            score: 150,
            clips: EnemyClips {
                idle: Clip::looping(4, 13),
                walk: Clip::looping(4, 17),
                attack: Clip::once(8, 7),
                hurt: Clip::once(4, 20),
                death: Clip::once(4, 9),
            },
        }
    }

    pub fn goblin() -> Self {
        Self {
            width: 40.0,
            height: 72.0,
            max_hp: 25,
            max_speed: 3.6,
            accel: 0.10,
            standoff: 90.0,
            vision: Zone::Forward {
                reach: 640.0,
                half_height: 72.0 * 0.35,
            },
            attack_zone: Zone::Forward {
                reach: 96.0,
                half_height: 64.0,
            },
            attack: EnemyAttack::Melee {
                damage: 1,
                reach: 56.0,
                half_height: 30.0,
            },
            attack_cooldown_ticks: 150,
            score: 100,
            clips: EnemyClips {
                idle: Clip::looping(4, 12),
                walk: Clip::looping(8, 8),
                attack: Clip::once(8, 6),
                hurt: Clip::once(4, 16),
                death: Clip::once(4, 9),
            },
            ..Self::skeleton()
        }
    }

    pub fn witch() -> Self {
        Self {
            width: 40.0,
            height: 88.0,
            max_hp: 20,
            max_speed: 1.9,
            accel: 0.12,
            friction: 0.7,
            standoff: 260.0,
            patrol_speed: 0.0,
            vision: Zone::Radius {
                rx: 680.0,
                ry: 340.0,
            },
            attack_zone: Zone::Radius {
                rx: 520.0,
                ry: 280.0,
            },
            attack: EnemyAttack::Fireball,
            attack_cooldown_ticks: 300,
            attack_keyframe: 8,
            hurt_iframes: 10,
            hurt_damping: 0.85,
            attack_damping: 0.70,
            score: 200,
            clips: EnemyClips {
                idle: Clip::looping(6, 10),
                walk: Clip::looping(8, 10),
                attack: Clip::once(12, 6),
                hurt: Clip::once(3, 14),
                death: Clip::once(10, 8),
            },
        }
    }

    pub fn grunt() -> Self {
        Self {
            width: 24.0,
            height: 28.0,
            max_hp: 10,
            max_speed: 1.2,
            accel: 0.2,
            friction: 0.8,
            standoff: 0.0,
            patrol_speed: 1.0,
            vision: Zone::Radius {
                rx: 280.0,
                ry: 280.0,
            },
            attack_zone: Zone::Radius {
                rx: 340.0,
                ry: 120.0,
            },
            attack: EnemyAttack::Bullet,
            attack_cooldown_ticks: 60,
            attack_keyframe: 2,
            hurt_iframes: 0,
            hurt_damping: 0.85,
            attack_damping: 0.9,
            score: 50,
            clips: EnemyClips {
                idle: Clip::looping(6, 8),
                walk: Clip::looping(6, 8),
                attack: Clip::once(4, 4),
                hurt: Clip::once(2, 6),
                death: Clip::once(3, 6),
            },
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self::skeleton()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyClips {
    pub idle: Clip,
    pub walk: Clip,
    pub attack: Clip,
    pub hurt: Clip,
    pub death: Clip,
}

/// Relative odds for the boss's free-state decision.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossWeights {
    pub melee: u32,
    pub range: u32,
    pub laser: u32,
    pub wait: u32,
}

impl Default for BossWeights {
    fn default() -> Self {
        Self {
            melee: 6,
            range: 5,
            laser: 4,
            wait: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossConfig {
    pub width: f32,
    pub height: f32,
    pub hp_max: u32,
    pub score: u64,
    pub walk_max: f32,
    pub chase_max: f32,
    pub accel: f32,
    pub friction: f32,
    pub sight_radius: f32,
    pub range_radius: f32,
    /// Player distance from the boss center that starts the appearance.
    pub summon_radius: f32,
    pub summon_immune_ticks: u32,
    /// Frozen pose held after the appearance; zero skips the cutscene.
    pub cutscene_ticks: u32,
    pub cooldown_melee: u32,
    pub cooldown_range: u32,
    pub cooldown_laser: u32,
    pub melee_dash_max: f32,
    pub melee_dash_accel: f32,
    pub melee_approach_timeout: u32,
    pub melee_hit_frame: u16,
    pub melee_damage: u32,
    pub arm_align_tolerance: f32,
    /// Arm hitbox half extents as fractions of the body size.
    pub arm_half_w: f32,
    pub arm_half_h: f32,
    /// Arm hitbox center offsets as fractions of the body size.
    pub arm_forward: f32,
    pub arm_offset_y: f32,
    /// Shard spawn point ahead of and above the center, as fractions of the body size.
    pub shard_forward: f32,
    pub shard_up: f32,
    /// Laser muzzle height relative to the center, as a fraction of body height.
    pub head_offset_y: f32,
    pub laser_windup_ticks: u32,
    pub laser_burst: u32,
    pub laser_first_delay: u32,
    pub laser_inter_delay: u32,
    /// Trailing frames of the cast strip looped while the burst fires.
    pub laser_loop_frames: u16,
    pub weights: BossWeights,
    pub attacks_before_rest: u32,
    pub forced_rest_ticks: (u32, u32),
    pub wait_ticks: (u32, u32),
    pub wait_walk_speed: f32,
    pub clips: BossClips,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            width: 220.0,
            height: 300.0,
            hp_max: 600,
            score: 10_000,
            walk_max: 2.0,
            chase_max: 3.0,
            accel: 0.12,
            friction: 0.70,
            sight_radius: 9_999.0,
            range_radius: 1_200.0,
            summon_radius: 420.0,
            summon_immune_ticks: 60,
            cutscene_ticks: 0,
            cooldown_melee: 120,
            cooldown_range: 180,
            cooldown_laser: 360,
            melee_dash_max: 10.0,
            melee_dash_accel: 0.35,
            melee_approach_timeout: 90,
            melee_hit_frame: 6,
            melee_damage: 1,
            arm_align_tolerance: 10.0,
            arm_half_w: 0.18,
            arm_half_h: 0.15,
            arm_forward: 0.55,
            arm_offset_y: 0.3,
            shard_forward: 0.45,
            shard_up: 0.35,
            head_offset_y: -0.42,
            laser_windup_ticks: 60,
            laser_burst: 3,
            laser_first_delay: 70,
            laser_inter_delay: 20,
            laser_loop_frames: 4,
            weights: BossWeights::default(),
            attacks_before_rest: 10,
            forced_rest_ticks: (150, 250),
            wait_ticks: (60, 120),
            wait_walk_speed: 1.2,
            clips: BossClips::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossClips {
    pub idle: Clip,
    pub glow: Clip,
    pub melee: Clip,
    pub range: Clip,
    pub laser: Clip,
    pub armor: Clip,
    pub immune: Clip,
    pub hurt: Clip,
    pub death: Clip,
    pub appear: Clip,
}

impl Default for BossClips {
    fn default() -> Self {
        Self {
            idle: Clip::looping(4, 9),
            glow: Clip::looping(8, 8),
            melee: Clip::once(9, 6),
            range: Clip::once(9, 7),
            laser: Clip::once(15, 5),
            armor: Clip::once(8, 7),
            immune: Clip::looping(4, 9),
            hurt: Clip::once(8, 14),
            death: Clip::once(14, 11),
            appear: Clip::once(14, 12),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectileConfig {
    pub arrow: ArrowConfig,
    pub fireball: FireballConfig,
    pub laser: LaserConfig,
    pub arm_shard: ArmShardConfig,
    pub bullet: BulletConfig,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrowConfig {
    pub speed: f32,
    pub length: f32,
    pub thickness: f32,
    pub damage: u32,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            speed: 14.0,
            length: 40.0,
            thickness: 6.0,
            damage: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FireballConfig {
    pub speed: f32,
    /// Downward pull per tick; zero flies straight at the snapshot.
    pub gravity: f32,
    pub size: f32,
    pub damage: u32,
    pub lifetime_ticks: u32,
    pub fly: Clip,
    pub explode: Clip,
}

impl Default for FireballConfig {
    fn default() -> Self {
        Self {
            speed: 5.6,
            gravity: 0.0,
            size: 28.0,
            damage: 1,
            lifetime_ticks: 600,
            fly: Clip::looping(4, 4),
            explode: Clip::once(6, 2),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LaserConfig {
    pub speed: f32,
    pub length: f32,
    pub thickness: f32,
    pub damage: u32,
    pub lifetime_ticks: u32,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            speed: 15.0,
            length: 96.0,
            thickness: 10.0,
            damage: 1,
            lifetime_ticks: 240,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArmShardConfig {
    pub speed: f32,
    pub length: f32,
    pub thickness: f32,
    pub damage: u32,
    pub lifetime_ticks: u32,
    /// Straight "tell" flight before the target is snapshotted.
    pub redirect_delay: u32,
    pub max_turn_deg: f32,
    pub arrive_radius: f32,
}

impl Default for ArmShardConfig {
    fn default() -> Self {
        Self {
            speed: 15.0,
            length: 11.0 * 32.0,
            thickness: 64.0,
            damage: 1,
            lifetime_ticks: 600,
            redirect_delay: 30,
            max_turn_deg: 10.0,
            arrive_radius: 32.0 * 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BulletConfig {
    pub radius: f32,
    pub speed: f32,
    pub damage: u32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            radius: 4.0,
            speed: 5.0,
            damage: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickupConfig {
    pub size: f32,
    pub bob_amplitude: f32,
    /// Radians of bob phase advanced per tick.
    pub bob_speed: f32,
    pub heart_heal: u32,
    pub arrow_refill: u8,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            size: 24.0,
            bob_amplitude: 4.0,
            bob_speed: 0.08,
            heart_heal: 1,
            arrow_refill: 3,
        }
    }
}
