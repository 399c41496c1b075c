//! Fixed-step world simulation.
//!
//! [`World`] owns every live entity and advances them in a fixed order each
//! tick: player, enemies, boss, projectiles, pickups, then cleanup and the
//! camera. Entities that finish dying are only swept out at the end of a
//! tick, never while another phase is iterating over them.

mod resolve;

use arrayvec::ArrayVec;

use crate::actor::{
    Boss, BossContext, Combatant, Cutscene, Enemy, EnemyContext, Life, Player, PlayerUpdate,
    Presence,
};
use crate::camera::Camera;
use crate::config::GameConfig;
use crate::env::{Level, TileMap};
use crate::error::ConfigError;
use crate::event::{EventQueue, GameEvent};
use crate::input::{InputTracker, Intent};
use crate::physics::PhysicsBody;
use crate::pickup::{Pickup, PickupKind};
use crate::projectile::{Projectile, ProjectileEnv, ProjectileKind};
use crate::snapshot::{EntityView, Hud, WorldSnapshot};
use crate::state::{EntityId, GameState, Tick};

use resolve::Ledger;

type Enemies = ArrayVec<Enemy, { GameConfig::MAX_ENEMIES }>;
type Projectiles = ArrayVec<Projectile, { GameConfig::MAX_PROJECTILES }>;
type Pickups = ArrayVec<Pickup, { GameConfig::MAX_PICKUPS }>;

/// Result of one call to [`World::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub tick: Tick,
    /// False when an overlay held the world still.
    pub simulated: bool,
}

pub struct World {
    config: GameConfig,
    level: Level,
    map: TileMap,
    player: Player,
    enemies: Enemies,
    boss: Option<Boss>,
    projectiles: Projectiles,
    pickups: Pickups,
    camera: Camera,
    state: GameState,
    input: InputTracker,
    tick: Tick,
    score: u64,
    high_score: u64,
    session_reported: bool,
    events: EventQueue,
}

impl World {
    /// Builds a session from a validated config and a parsed level.
    ///
    /// `high_score` is the best score recorded by earlier sessions; it is only
    /// compared against, never persisted, by the world.
    pub fn new(config: GameConfig, level: Level, high_score: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = Player::new(level.player_start, &config);
        let mut world = Self {
            map: level.map.clone(),
            player,
            enemies: ArrayVec::new(),
            boss: None,
            projectiles: ArrayVec::new(),
            pickups: ArrayVec::new(),
            camera: Camera::default(),
            state: GameState::new(),
            input: InputTracker::default(),
            tick: Tick::ZERO,
            score: 0,
            high_score,
            session_reported: false,
            events: EventQueue::new(),
            config,
            level,
        };
        world.populate();
        Ok(world)
    }

    fn populate(&mut self) {
        let config = &self.config;
        let mut next_id = EntityId::FIRST_DYNAMIC;

        self.enemies.clear();
        for spawn in self.level.enemies.iter().take(GameConfig::MAX_ENEMIES) {
            self.enemies
                .push(Enemy::new(EntityId(next_id), spawn.kind, spawn.foot, config));
            next_id += 1;
        }
        self.pickups.clear();
        for spawn in self.level.pickups.iter().take(GameConfig::MAX_PICKUPS) {
            self.pickups.push(Pickup::new(
                EntityId(next_id),
                spawn.kind,
                spawn.foot,
                &config.pickups,
            ));
            next_id += 1;
        }
        self.boss = self.level.boss_start.map(|foot| Boss::new(foot, config));
        self.projectiles.clear();
    }

    /// Restarts the level. The best score seen so far carries over.
    pub fn reset(&mut self) {
        self.map = self.level.map.clone();
        self.player.reset(self.level.player_start, &self.config);
        self.populate();
        self.state.reset();
        self.input.reset();
        self.tick = Tick::ZERO;
        self.score = 0;
        self.session_reported = false;
        self.events.clear();
        self.follow_player();
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
        self.follow_player();
    }

    /// Freezes or releases the boss for an external cinematic.
    pub fn set_boss_cutscene(&mut self, cutscene: Cutscene) {
        if let Some(boss) = self.boss.as_mut() {
            boss.set_cutscene(cutscene);
            boss.drain_events_into(&mut self.events);
        }
    }

    /// Flips the pause overlay. Returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.state.toggle_pause()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Advances one fixed step with the intents currently held.
    pub fn tick(&mut self, held: Intent) -> TickReport {
        let input = self.input.next(held);

        if self.state.any_overlay() {
            self.tick_frozen_boss();
            return TickReport {
                tick: self.tick,
                simulated: false,
            };
        }
        self.tick = self.tick.next();

        let player_update = self
            .player
            .update(&input, &self.map, &self.config, &self.state);
        self.apply_player_update(player_update);
        self.update_enemies();
        self.update_boss();
        self.update_projectiles();
        self.update_pickups();
        self.sweep();
        self.check_session_end();
        self.follow_player();

        TickReport {
            tick: self.tick,
            simulated: true,
        }
    }

    fn tick_frozen_boss(&mut self) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        if !boss.is_frozen() {
            return;
        }
        boss.animate_frozen(&self.config.boss);
    }

    fn apply_player_update(&mut self, update: PlayerUpdate) {
        if let Some(arrow) = update.arrow {
            if self.projectiles.try_push(Projectile::Arrow(arrow)).is_ok() {
                self.events.push(GameEvent::ArrowFired {
                    ammo: self.player.quiver().ammo(),
                });
            }
        }
        if let Some(strike) = update.strike {
            self.events.push(GameEvent::MeleeStrike {
                hitbox: strike.hitbox,
                phase: strike.phase,
            });
            let mut ledger = Ledger {
                score: &mut self.score,
                events: &mut self.events,
            };
            resolve::player_strike(
                &strike.hitbox,
                strike.damage,
                &mut self.enemies,
                self.boss.as_mut(),
                &self.config,
                &mut ledger,
            );
        }
    }

    fn update_enemies(&mut self) {
        let ctx = EnemyContext {
            config: &self.config,
            map: &self.map,
            player: self.player.hurtbox(),
            player_alive: self.player.is_alive(),
        };
        for enemy in self.enemies.iter_mut() {
            let update = enemy.update(&ctx);
            if update.attack_started {
                self.events.push(GameEvent::EnemyAttack {
                    id: enemy.id,
                    kind: enemy.kind,
                });
            }
            if let Some(strike) = update.strike {
                if strike.hitbox.overlaps(&self.player.hurtbox()) {
                    resolve::hurt_player(&mut self.player, strike.damage, &mut self.events);
                }
            }
            if let Some(projectile) = update.projectile {
                self.events.push(GameEvent::Throw {
                    id: enemy.id,
                    projectile: projectile.kind(),
                });
                let _ = self.projectiles.try_push(projectile);
            }
        }
    }

    fn update_boss(&mut self) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        let shard_alive = self
            .projectiles
            .iter()
            .any(|p| p.kind() == ProjectileKind::ArmShard && !p.is_dead());
        let update = boss.update(&BossContext {
            config: &self.config,
            map: &self.map,
            player: self.player.hurtbox(),
            player_alive: self.player.is_alive(),
            shard_alive,
            tick: self.tick.0,
        });
        boss.drain_events_into(&mut self.events);

        if let Some(strike) = update.strike {
            if strike.hitbox.overlaps(&self.player.hurtbox()) {
                resolve::hurt_player(&mut self.player, strike.damage, &mut self.events);
            }
        }
        if let Some(projectile) = update.projectile {
            let _ = self.projectiles.try_push(projectile);
        }
    }

    fn update_projectiles(&mut self) {
        let env = ProjectileEnv {
            world_width: self.map.pixel_width(),
            world_height: self.map.pixel_height(),
            cull_margin: self.config.world.cull_margin,
            target: self.player.body().center(),
        };
        let mut ledger = Ledger {
            score: &mut self.score,
            events: &mut self.events,
        };
        for projectile in self.projectiles.iter_mut() {
            projectile.update(&env);
            if self.map.rect_collides_solid(&projectile.bounds()) && projectile.hit_tile() {
                resolve::announce_tile_hit(projectile, ledger.events);
            }
            resolve::projectile_hits(
                projectile,
                &mut self.player,
                &mut self.enemies,
                self.boss.as_mut(),
                &self.config,
                &mut ledger,
            );
        }
    }

    fn update_pickups(&mut self) {
        let pickups = &self.config.pickups;
        let alive = self.player.is_alive();
        let reach = self.player.hurtbox();
        for pickup in self.pickups.iter_mut() {
            pickup.update(pickups);
            if !alive || pickup.is_collected() || !pickup.bounds(pickups).overlaps(&reach) {
                continue;
            }
            match pickup.kind {
                PickupKind::Heart => {
                    self.player.heal(pickups.heart_heal);
                }
                PickupKind::Arrows => {
                    self.player.refill_arrows(pickups.arrow_refill);
                }
            }
            pickup.collect();
            self.events
                .push(GameEvent::PickupCollected { kind: pickup.kind });
        }
    }

    fn sweep(&mut self) {
        self.enemies.retain(|enemy| enemy.life() != Life::Gone);
        self.projectiles.retain(|projectile| !projectile.is_dead());
        self.pickups.retain(|pickup| !pickup.is_collected());
    }

    fn check_session_end(&mut self) {
        if self.player.life() == Life::Gone && !self.state.game_over {
            self.state.game_over = true;
            self.events.push(GameEvent::GameOver);
        } else if !self.state.is_over()
            && self
                .boss
                .as_ref()
                .is_some_and(|boss| boss.presence() == Presence::Gone)
        {
            self.state.victory = true;
            self.events.push(GameEvent::Victory);
        }

        if self.state.is_over() && !self.session_reported {
            self.session_reported = true;
            if self.score > self.high_score {
                self.events.push(GameEvent::NewHighScore {
                    score: self.score,
                    previous: self.high_score,
                });
                self.high_score = self.score;
            }
        }
    }

    fn follow_player(&mut self) {
        let target = self.player.body().center();
        self.camera
            .follow(target, self.map.pixel_width(), self.map.pixel_height());
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let player = self.player.health();
        let quiver = self.player.quiver();
        let boss_summoned = self
            .boss
            .as_ref()
            .filter(|boss| !matches!(boss.presence(), Presence::Dormant | Presence::Appearing));
        WorldSnapshot {
            tick: self.tick,
            camera: self.camera,
            hud: Hud {
                hp: player.current,
                max_hp: player.maximum,
                ammo: quiver.ammo(),
                quiver_capacity: quiver.capacity(),
                score: self.score,
                high_score: self.high_score.max(self.score),
                boss_hp: boss_summoned.map(|boss| (boss.health().current, boss.health().maximum)),
                boss_armor: boss_summoned.map_or(0, |boss| boss.armor().stacks()),
            },
            player: EntityView::of_player(&self.player),
            enemies: self.enemies.iter().map(EntityView::of_enemy).collect(),
            boss: self.boss.as_ref().map(EntityView::of_boss),
            projectiles: self
                .projectiles
                .iter()
                .map(EntityView::of_projectile)
                .collect(),
            pickups: self
                .pickups
                .iter()
                .map(|pickup| EntityView::of_pickup(pickup, &self.config))
                .collect(),
            state: self.state,
        }
    }
}
