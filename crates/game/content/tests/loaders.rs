use std::fs;

use platformer_content::{ContentFactory, LevelLoader};
use platformer_core::{Cell, EnemyKind, GameConfig, LevelOrigin, PickupKind, Vec2};
use tempfile::TempDir;

const ARENA: &str = "\
; small arena
..........
.P...S..B.
.....^^^..
..H.G...A.
##########
";

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("levels")).expect("levels dir");
    fs::write(dir.path().join("levels/arena.txt"), ARENA).expect("write level");
    dir
}

#[test]
fn level_file_markers_become_foot_spawns() {
    let dir = data_dir();
    let config = GameConfig::default();
    let level = LevelLoader::load(&dir.path().join("levels/arena.txt"), &config).expect("level");

    assert_eq!(level.origin, LevelOrigin::Parsed);
    assert_eq!(level.player_start, Vec2::new(48.0, 64.0));
    assert_eq!(level.boss_start, Some(Vec2::new(8.0 * 32.0 + 16.0, 64.0)));

    let kinds: Vec<EnemyKind> = level.enemies.iter().map(|spawn| spawn.kind).collect();
    assert_eq!(kinds, vec![EnemyKind::Skeleton, EnemyKind::Goblin]);
    let pickups: Vec<PickupKind> = level.pickups.iter().map(|spawn| spawn.kind).collect();
    assert_eq!(pickups, vec![PickupKind::Heart, PickupKind::Arrows]);

    assert_eq!(level.map.cell(5, 2), Some(Cell::OneWay));
    assert_eq!(level.map.cell(0, 4), Some(Cell::Solid));
    // Marker cells are cleared.
    assert_eq!(level.map.cell(1, 1), Some(Cell::Empty));
}

#[test]
fn broken_level_is_an_error_when_loaded_strictly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.txt");
    fs::write(&path, "..?..\n#####\n").expect("write level");

    let err = LevelLoader::load(&path, &GameConfig::default()).expect_err("unknown glyph");
    assert!(err.to_string().contains("unknown glyph"));
}

#[test]
fn unusable_level_falls_back_to_generated_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no_player.txt");
    fs::write(&path, "..........\n##########\n").expect("write level");
    let config = GameConfig::default();

    let level = LevelLoader::load_or_generate(Some(&path), &config);
    assert_eq!(level.origin, LevelOrigin::Generated);
    assert!(level.boss_start.is_some());

    let missing = LevelLoader::load_or_generate(Some(&dir.path().join("absent.txt")), &config);
    assert_eq!(missing.origin, LevelOrigin::Generated);
}

#[test]
fn factory_reads_directory_config_and_levels() {
    let dir = data_dir();
    let factory = ContentFactory::new(dir.path());

    let defaults = factory.load_config().expect("defaults without a file");
    assert_eq!(defaults, GameConfig::default());

    fs::write(dir.path().join("config.toml"), "seed = 99\n[player]\nmax_hp = 6\n")
        .expect("write config");
    let config = factory.load_config().expect("config");
    assert_eq!(config.seed, 99);
    assert_eq!(config.player.max_hp, 6);

    let level = factory.load_level("arena", &config).expect("arena");
    assert_eq!(level.enemies.len(), 2);
    assert!(factory.load_level("missing", &config).is_err());
}
