use std::sync::Arc;

use platformer_core::{
    BossAnim, Cell, Cutscene, EnemyKind, GameConfig, GameEvent, Intent, Level, LevelOrigin, Spawn,
    TileMap, Vec2,
};
use platformer_runtime::{
    HighScoreStore, InMemoryHighScore, Runtime, RuntimeError, Topic,
};

fn flat_level(cols: u32) -> Level {
    let mut map = TileMap::new(cols, 12, 32, 6.0);
    for col in 0..cols {
        map.set(col, 10, Cell::Solid);
    }
    Level {
        map,
        player_start: Vec2::new(300.0, 320.0),
        boss_start: None,
        enemies: Vec::new(),
        pickups: Vec::new(),
        origin: LevelOrigin::Parsed,
    }
}

#[tokio::test]
async fn step_advances_and_pause_holds() {
    let runtime = Runtime::builder().level(flat_level(40)).build().unwrap();
    let handle = runtime.handle();

    let summary = handle.step(Some(Intent::MOVE_RIGHT), 10).await.unwrap();
    assert_eq!(summary.tick.0, 10);
    assert_eq!(summary.simulated, 10);

    let before = handle.query_snapshot().await.unwrap();
    assert!(before.player.bounds.left > 280.0);

    assert!(handle.toggle_pause().await.unwrap());
    let paused = handle.step(None, 5).await.unwrap();
    assert_eq!(paused.simulated, 0);
    assert_eq!(paused.tick.0, 10);
    assert!(paused.state.paused);

    let after = handle.query_snapshot().await.unwrap();
    assert_eq!(after.player.bounds, before.player.bounds);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn session_end_publishes_and_saves_high_score() {
    let mut config = GameConfig::default();
    config.skeleton.max_hp = 1;
    config.goblin.standoff = 0.0;
    config.goblin.attack_cooldown_ticks = 30;

    let mut level = flat_level(60);
    level.enemies.push(Spawn {
        kind: EnemyKind::Skeleton,
        foot: Vec2::new(900.0, 320.0),
    });
    level.enemies.push(Spawn {
        kind: EnemyKind::Goblin,
        foot: Vec2::new(220.0, 320.0),
    });

    let store = Arc::new(InMemoryHighScore::new());
    let runtime = Runtime::builder()
        .game_config(config.clone())
        .level(level)
        .high_scores(store.clone())
        .build()
        .unwrap();
    let handle = runtime.handle();
    let mut session = handle.subscribe(Topic::Session);

    let mut over = false;
    for _ in 0..40 {
        let summary = handle.step(Some(Intent::FIRE), 60).await.unwrap();
        if summary.state.game_over {
            over = true;
            break;
        }
    }
    assert!(over, "player never died");

    let mut names = Vec::new();
    while let Ok(event) = session.try_recv() {
        names.push(event.event);
    }
    assert!(names.contains(&GameEvent::GameOver));
    assert!(names.contains(&GameEvent::NewHighScore {
        score: config.skeleton.score,
        previous: 0,
    }));
    assert_eq!(store.load().unwrap(), config.skeleton.score);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn boss_cutscene_is_announced_on_boss_topic() {
    let mut level = flat_level(60);
    level.boss_start = Some(Vec2::new(1500.0, 320.0));
    let runtime = Runtime::builder().level(level).build().unwrap();
    let handle = runtime.handle();
    let mut boss_rx = handle.subscribe(Topic::Boss);

    handle
        .set_boss_cutscene(Cutscene::Frozen {
            pose: BossAnim::Idle,
            remaining: None,
        })
        .await
        .unwrap();
    let event = boss_rx.recv().await.unwrap();
    assert_eq!(event.event, GameEvent::BossCutscene { frozen: true });

    handle.set_boss_cutscene(Cutscene::Active).await.unwrap();
    let event = boss_rx.recv().await.unwrap();
    assert_eq!(event.event, GameEvent::BossCutscene { frozen: false });

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn reset_restores_spawn_state() {
    let runtime = Runtime::builder().level(flat_level(40)).build().unwrap();
    let handle = runtime.handle();

    handle.step(Some(Intent::MOVE_RIGHT), 30).await.unwrap();
    handle.reset().await.unwrap();

    let snapshot = handle.query_snapshot().await.unwrap();
    assert_eq!(snapshot.tick.0, 0);
    assert_eq!(snapshot.player.bounds.left, 280.0);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn build_requires_level_and_valid_config() {
    assert!(matches!(
        Runtime::builder().build(),
        Err(RuntimeError::MissingLevel)
    ));

    let mut config = GameConfig::default();
    config.quiver.capacity = 0;
    assert!(matches!(
        Runtime::builder()
            .game_config(config)
            .level(flat_level(10))
            .build(),
        Err(RuntimeError::InvalidConfig(_))
    ));
}

#[tokio::test]
async fn stored_high_score_is_injected() {
    let store = Arc::new(InMemoryHighScore::with_score(4_200));
    let runtime = Runtime::builder()
        .level(flat_level(10))
        .high_scores(store)
        .build()
        .unwrap();
    let handle = runtime.handle();

    let snapshot = handle.query_snapshot().await.unwrap();
    assert_eq!(snapshot.hud.high_score, 4_200);
    assert_eq!(snapshot.hud.score, 0);

    drop(handle);
    runtime.shutdown().await.unwrap();
}
