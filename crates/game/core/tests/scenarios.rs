//! End-to-end gameplay scenarios driven through the public API.

use platformer_core::actor::{BossContext, EnemyContext, Player};
use platformer_core::env::{PcgRng, RngOracle, compute_seed};
use platformer_core::projectile::{ArmShard, Flight, ProjectileEnv};
use platformer_core::{
    Aabb, Boss, Cell, Combatant, Enemy, EnemyKind, EntityId, GameConfig, GameEvent, GameState,
    HitResult, InputTracker, Intent, Level, LevelOrigin, Life, PhysicsBody, Presence, Quiver,
    Spawn, TileMap, Vec2, World,
};

fn flat_map(cols: u32) -> TileMap {
    let mut map = TileMap::new(cols, 12, 32, 6.0);
    for col in 0..cols {
        map.set(col, 10, Cell::Solid);
    }
    map
}

fn player_box(x: f32) -> Aabb {
    Aabb::from_xywh(x, 192.0, 40.0, 128.0)
}

fn awake_boss(config: &GameConfig, map: &TileMap, player: Aabb) -> (Boss, u64) {
    let mut boss = Boss::new(Vec2::new(1000.0, 320.0), config);
    let mut tick = 0;
    while boss.presence() != Presence::Active || !boss.is_vulnerable() {
        boss.update(&BossContext {
            config,
            map,
            player,
            player_alive: true,
            shard_alive: false,
            tick,
        });
        tick += 1;
        assert!(tick < 2_000, "boss never became vulnerable");
    }
    (boss, tick)
}

#[test]
fn player_lands_on_three_cell_floor_in_one_tick() {
    let config = GameConfig::default();
    let mut map = TileMap::new(20, 12, 32, 6.0);
    for col in 4..7 {
        map.set(col, 10, Cell::Solid);
    }
    let mut player = Player::new(Vec2::new(5.0 * 32.0 + 16.0, 10.0 * 32.0), &config);
    let mut input = InputTracker::default();

    player.update(&input.next(Intent::empty()), &map, &config, &GameState::new());

    let body = player.body();
    assert_eq!(body.y, 320.0 - config.player.height);
    assert_eq!(body.vy, 0.0);
    assert!(body.grounded);
}

#[test]
fn quiver_reloads_one_arrow_after_sixty_ticks() {
    let config = GameConfig::default();
    let state = GameState::new();
    let mut quiver = Quiver::new(&config.quiver);

    assert!(quiver.try_consume(&state));
    assert_eq!(quiver.ammo(), 4);
    for _ in 0..59 {
        quiver.tick(&state);
    }
    assert_eq!(quiver.ammo(), 4);
    quiver.tick(&state);
    assert_eq!(quiver.ammo(), 5);
}

#[test]
fn ammo_is_conserved_under_random_play() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let mut quiver = Quiver::new(&config.quiver);
    let mut state = GameState::new();
    let capacity = quiver.capacity() as usize;

    for step in 0..5_000u64 {
        let roll = rng.next_u32(compute_seed(7, step, 0, 0)) % 10;
        match roll {
            0..=3 => {
                quiver.try_consume(&state);
            }
            4 => {
                state.toggle_pause();
            }
            _ => quiver.tick(&state),
        }
        let pending = quiver.reloads().iter().filter(|&&left| left > 0).count();
        assert!(quiver.ammo() as usize + pending <= capacity);
    }
}

#[test]
fn melee_strikes_once_per_phase() {
    let config = GameConfig::default();
    let map = flat_map(40);
    let state = GameState::new();
    let mut player = Player::new(Vec2::new(200.0, 320.0), &config);
    let mut input = InputTracker::default();

    let mut per_phase = vec![0u32; config.melee.phases.len()];
    for _ in 0..config.melee.clip.duration() + 20 {
        let out = player.update(&input.next(Intent::MELEE), &map, &config, &state);
        if let Some(strike) = out.strike {
            per_phase[strike.phase as usize] += 1;
        }
    }
    assert!(per_phase.iter().all(|&count| count == 1), "{per_phase:?}");
}

#[test]
fn boss_armor_crossing_uses_old_multiplier() {
    let config = GameConfig::default();
    let map = flat_map(80);
    let (mut boss, _) = awake_boss(&config, &map, player_box(700.0));
    let max = config.boss.hp_max;

    // 600 -> 456 is exactly 76%.
    assert!(boss.hit(max - max * 76 / 100).landed());
    assert_eq!(boss.health().current, max * 76 / 100);
    assert_eq!(boss.armor().stacks(), 0);

    // 456 -> 444 is 74%: full damage, stack applies afterwards.
    assert_eq!(
        boss.hit(12),
        HitResult::Hurt {
            dealt: 12,
            remaining: 444
        }
    );
    assert_eq!(boss.armor().stacks(), 1);
    assert_eq!(
        boss.hit(100),
        HitResult::Hurt {
            dealt: 75,
            remaining: 369
        }
    );
}

#[test]
fn boss_armor_never_decreases() {
    let config = GameConfig::default();
    let map = flat_map(80);
    let (mut boss, _) = awake_boss(&config, &map, player_box(700.0));

    let mut last = 0;
    let mut died = 0;
    for _ in 0..200 {
        if let HitResult::Killed { .. } = boss.hit(37) {
            died += 1;
        }
        let stacks = boss.armor().stacks();
        assert!(stacks >= last);
        let expected = 0.75f32.powi(stacks as i32);
        assert!((boss.armor().multiplier() - expected).abs() < 1e-6);
        last = stacks;
    }
    assert_eq!(last, 3);
    assert_eq!(died, 1);
    assert_eq!(boss.hit(37), HitResult::Ignored);
}

#[test]
fn dead_enemy_ignores_further_hits() {
    let config = GameConfig::default();
    let map = flat_map(40);
    let mut witch = Enemy::new(EntityId(9), EnemyKind::Witch, Vec2::new(600.0, 320.0), &config);

    assert!(matches!(witch.hit(1_000), HitResult::Killed { .. }));
    let hp = witch.health().current;
    for _ in 0..5 {
        assert_eq!(witch.hit(1_000), HitResult::Ignored);
        witch.update(&EnemyContext {
            config: &config,
            map: &map,
            player: player_box(100.0),
            player_alive: true,
        });
    }
    assert_eq!(witch.health().current, hp);
    assert_ne!(witch.life(), Life::Alive);
}

#[test]
fn arm_shard_locks_onto_position_at_end_of_tell() {
    let config = GameConfig::default();
    let shard_config = &config.projectiles.arm_shard;
    let mut shard = ArmShard::new(Vec2::new(1000.0, 300.0), -1.0, shard_config);
    let env = |target| ProjectileEnv {
        world_width: 4_000.0,
        world_height: 640.0,
        cull_margin: 64.0,
        target,
    };

    let early = Vec2::new(200.0, 300.0);
    let late = Vec2::new(400.0, 100.0);
    for tick in 1..=shard_config.redirect_delay {
        let target = if tick < shard_config.redirect_delay { early } else { late };
        shard.update(&env(target));
    }
    assert_eq!(shard.locked_target(), Some(late));

    shard.update(&env(early));
    assert_eq!(shard.locked_target(), Some(late));
}

#[test]
fn player_death_ends_session_once() {
    let mut config = GameConfig::default();
    config.goblin.standoff = 0.0;
    config.goblin.attack_cooldown_ticks = 30;
    let level = Level {
        map: flat_map(40),
        player_start: Vec2::new(100.0, 320.0),
        boss_start: None,
        enemies: vec![Spawn {
            kind: EnemyKind::Goblin,
            foot: Vec2::new(180.0, 320.0),
        }],
        pickups: Vec::new(),
        origin: LevelOrigin::Parsed,
    };
    let mut world = World::new(config, level, 100).expect("valid config");

    let mut events = Vec::new();
    for _ in 0..2_000 {
        world.tick(Intent::empty());
        events.extend(world.drain_events());
        if world.state().game_over {
            break;
        }
    }
    assert!(world.state().game_over);
    assert_eq!(
        events.iter().filter(|e| **e == GameEvent::PlayerDied).count(),
        1
    );
    assert_eq!(events.iter().filter(|e| **e == GameEvent::GameOver).count(), 1);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::NewHighScore { .. })));

    let frozen = world.tick(Intent::MOVE_RIGHT);
    assert!(!frozen.simulated);
    assert!(world.drain_events().is_empty());

    world.reset();
    assert!(!world.state().is_over());
    assert_eq!(world.player().health().current, world.config().player.max_hp);
}
