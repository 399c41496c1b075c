//! ASCII level grids and spawn-marker extraction.
//!
//! One character per cell. Terrain glyphs become [`Cell`]s; marker glyphs are
//! recorded as spawn points and replaced by empty cells. The alphabet is part
//! of [`crate::GameConfig`] rather than hardcoded here.

use crate::actor::EnemyKind;
use crate::config::WorldConfig;
use crate::env::{Cell, LevelError, TileMap};
use crate::geometry::Vec2;
use crate::pickup::PickupKind;

/// Glyphs understood by the level parser.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarkerAlphabet {
    pub empty: char,
    pub solid: char,
    pub one_way: char,
    pub player: char,
    pub boss: char,
    pub skeleton: char,
    pub goblin: char,
    pub witch: char,
    pub grunt: char,
    pub heart: char,
    pub arrows: char,
}

impl Default for MarkerAlphabet {
    fn default() -> Self {
        Self {
            empty: '.',
            solid: '#',
            one_way: '^',
            player: 'P',
            boss: 'B',
            skeleton: 'S',
            goblin: 'G',
            witch: 'W',
            grunt: 'E',
            heart: 'H',
            arrows: 'A',
        }
    }
}

/// What a single glyph means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    Terrain(Cell),
    Player,
    Boss,
    Enemy(EnemyKind),
    Pickup(PickupKind),
}

impl MarkerAlphabet {
    fn classify(&self, glyph: char) -> Option<Glyph> {
        let kind = match glyph {
            g if g == self.empty => Glyph::Terrain(Cell::Empty),
            g if g == self.solid => Glyph::Terrain(Cell::Solid),
            g if g == self.one_way => Glyph::Terrain(Cell::OneWay),
            g if g == self.player => Glyph::Player,
            g if g == self.boss => Glyph::Boss,
            g if g == self.skeleton => Glyph::Enemy(EnemyKind::Skeleton),
            g if g == self.goblin => Glyph::Enemy(EnemyKind::Goblin),
            g if g == self.witch => Glyph::Enemy(EnemyKind::Witch),
            g if g == self.grunt => Glyph::Enemy(EnemyKind::Grunt),
            g if g == self.heart => Glyph::Pickup(PickupKind::Heart),
            g if g == self.arrows => Glyph::Pickup(PickupKind::Arrows),
            _ => return None,
        };
        Some(kind)
    }

    fn enemy(&self, kind: EnemyKind) -> char {
        match kind {
            EnemyKind::Skeleton => self.skeleton,
            EnemyKind::Goblin => self.goblin,
            EnemyKind::Witch => self.witch,
            EnemyKind::Grunt => self.grunt,
        }
    }
}

/// A spawn point: the bottom-center of the marker cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spawn<K> {
    pub kind: K,
    pub foot: Vec2,
}

/// Where the level came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelOrigin {
    Parsed,
    Generated,
}

/// Parsed level: the live grid plus the markers scanned out of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub map: TileMap,
    pub player_start: Vec2,
    pub boss_start: Option<Vec2>,
    pub enemies: Vec<Spawn<EnemyKind>>,
    pub pickups: Vec<Spawn<PickupKind>>,
    pub origin: LevelOrigin,
}

impl Level {
    /// Parses an ASCII grid. Rows shorter than the world are padded with
    /// empty cells; missing rows at the bottom stay empty.
    pub fn parse(
        source: &str,
        world: &WorldConfig,
        markers: &MarkerAlphabet,
    ) -> Result<Self, LevelError> {
        let lines: Vec<&str> = source
            .trim_end()
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        if lines.iter().all(|line| line.is_empty()) {
            return Err(LevelError::Empty);
        }
        if lines.len() > world.rows as usize {
            return Err(LevelError::TooManyRows {
                found: lines.len() as u32,
                max: world.rows,
            });
        }

        let mut map = TileMap::new(world.cols, world.rows, world.tile_size, world.one_way_band);
        let ts = world.tile_size as f32;
        let foot = |col: u32, row: u32| Vec2::new(col as f32 * ts + ts * 0.5, (row + 1) as f32 * ts);

        let mut player_start = None;
        let mut boss_start = None;
        let mut enemies = Vec::new();
        let mut pickups = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            let row = row as u32;
            let width = line.chars().count() as u32;
            if width > world.cols {
                return Err(LevelError::RowTooWide {
                    row,
                    found: width,
                    max: world.cols,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let col = col as u32;
                let kind = markers.classify(glyph).ok_or(LevelError::UnknownGlyph {
                    glyph,
                    row,
                    col,
                })?;
                match kind {
                    Glyph::Terrain(cell) => map.set(col, row, cell),
                    Glyph::Player => {
                        if player_start.is_some() {
                            return Err(LevelError::DuplicateMarker {
                                marker: glyph,
                                row,
                                col,
                            });
                        }
                        player_start = Some(foot(col, row));
                    }
                    Glyph::Boss => {
                        if boss_start.is_some() {
                            return Err(LevelError::DuplicateMarker {
                                marker: glyph,
                                row,
                                col,
                            });
                        }
                        boss_start = Some(foot(col, row));
                    }
                    Glyph::Enemy(kind) => enemies.push(Spawn {
                        kind,
                        foot: foot(col, row),
                    }),
                    Glyph::Pickup(kind) => pickups.push(Spawn {
                        kind,
                        foot: foot(col, row),
                    }),
                }
            }
        }

        let player_start = player_start.ok_or(LevelError::MissingPlayerStart {
            marker: markers.player,
        })?;

        Ok(Self {
            map,
            player_start,
            boss_start,
            enemies,
            pickups,
            origin: LevelOrigin::Parsed,
        })
    }

    /// Builds the stock layout: a ground strip with studs, rows of one-way
    /// platforms, enemies spread along the run, and the boss near the end.
    pub fn generate_default(world: &WorldConfig, markers: &MarkerAlphabet) -> Self {
        let source = default_layout(world, markers);
        match Self::parse(&source, world, markers) {
            Ok(mut level) => {
                level.origin = LevelOrigin::Generated;
                level
            }
            // The generated text only uses alphabet glyphs and always places a
            // player, so this arm is reached only for a degenerate world.
            Err(_) => Self {
                map: TileMap::new(world.cols, world.rows, world.tile_size, world.one_way_band),
                player_start: Vec2::new(world.tile_size as f32 * 0.5, world.tile_size as f32),
                boss_start: None,
                enemies: Vec::new(),
                pickups: Vec::new(),
                origin: LevelOrigin::Generated,
            },
        }
    }

    /// Parses `source`, falling back to [`Level::generate_default`] when it is
    /// unusable. The error that forced the fallback is returned alongside so
    /// the caller can report it.
    pub fn parse_or_generate(
        source: &str,
        world: &WorldConfig,
        markers: &MarkerAlphabet,
    ) -> (Self, Option<LevelError>) {
        match Self::parse(source, world, markers) {
            Ok(level) => (level, None),
            Err(err) => (Self::generate_default(world, markers), Some(err)),
        }
    }
}

fn default_layout(world: &WorldConfig, markers: &MarkerAlphabet) -> String {
    let cols = world.cols as usize;
    let rows = world.rows as usize;
    let mut grid = vec![vec![markers.empty; cols]; rows];
    if cols == 0 || rows == 0 {
        return String::new();
    }

    let ground = rows.saturating_sub(2);
    let above = ground.saturating_sub(1);
    for cell in grid[ground].iter_mut() {
        *cell = markers.solid;
    }
    for col in (0..cols).step_by(7) {
        grid[above][col] = markers.solid;
    }

    let place_platform = |grid: &mut [Vec<char>], start: usize, row: usize, len: usize| {
        if row < ground {
            for col in start..=(start + len).min(cols - 1) {
                grid[row][col] = markers.one_way;
            }
        }
    };
    for col in (10..cols.saturating_sub(10)).step_by(14) {
        place_platform(&mut grid, col, 10 + col % 3, 6);
    }
    for col in (50..cols.saturating_sub(20)).step_by(25) {
        place_platform(&mut grid, col, 6 + col % 4, 10);
    }

    grid[above][2.min(cols - 1)] = markers.player;

    let ground_kinds = [EnemyKind::Skeleton, EnemyKind::Goblin, EnemyKind::Witch];
    for (i, col) in (40..cols.saturating_sub(60)).step_by(80).enumerate() {
        grid[above][col] = markers.enemy(ground_kinds[i % ground_kinds.len()]);
    }
    if ground >= 5 {
        for col in (120..cols.saturating_sub(60)).step_by(100) {
            grid[ground - 5][col] = markers.grunt;
        }
    }
    for (i, col) in (30..cols.saturating_sub(30)).step_by(60).enumerate() {
        grid[above][col] = if i % 2 == 0 {
            markers.arrows
        } else {
            markers.heart
        };
    }
    if cols > 12 {
        grid[above][cols - 10] = markers.boss;
    }

    let mut out = String::with_capacity(rows * (cols + 1));
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_world() -> WorldConfig {
        WorldConfig {
            cols: 12,
            rows: 6,
            ..WorldConfig::default()
        }
    }

    #[test]
    fn markers_become_spawns_and_empty_cells() {
        let source = "\
............
..P.....B...
..S..H......
^^^^........
############
";
        let level = Level::parse(source, &small_world(), &MarkerAlphabet::default())
            .expect("valid level");
        assert_eq!(level.player_start, Vec2::new(2.0 * 32.0 + 16.0, 64.0));
        assert_eq!(level.boss_start, Some(Vec2::new(8.0 * 32.0 + 16.0, 64.0)));
        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.enemies[0].kind, EnemyKind::Skeleton);
        assert_eq!(level.pickups[0].kind, PickupKind::Heart);
        assert!(!level.map.solid_at(2, 1));
        assert!(level.map.one_way_at(0, 3));
        assert!(level.map.solid_at(11, 4));
        assert_eq!(level.origin, LevelOrigin::Parsed);
    }

    #[test]
    fn missing_player_fails_fast() {
        let err = Level::parse("....\n####\n", &small_world(), &MarkerAlphabet::default())
            .unwrap_err();
        assert_eq!(err, LevelError::MissingPlayerStart { marker: 'P' });
    }

    #[test]
    fn oversized_and_unknown_input_rejected() {
        let markers = MarkerAlphabet::default();
        let world = small_world();
        let too_wide = "P.............\n";
        assert!(matches!(
            Level::parse(too_wide, &world, &markers),
            Err(LevelError::RowTooWide { row: 0, found: 14, max: 12 })
        ));
        let unknown = "P..x\n";
        assert_eq!(
            Level::parse(unknown, &world, &markers),
            Err(LevelError::UnknownGlyph {
                glyph: 'x',
                row: 0,
                col: 3
            })
        );
        let tall = "P\n.\n.\n.\n.\n.\n.\n";
        assert!(matches!(
            Level::parse(tall, &world, &markers),
            Err(LevelError::TooManyRows { found: 7, max: 6 })
        ));
        assert_eq!(Level::parse("\n\n", &world, &markers), Err(LevelError::Empty));
    }

    #[test]
    fn custom_alphabet_is_honoured() {
        let markers = MarkerAlphabet {
            solid: 'X',
            player: '@',
            ..MarkerAlphabet::default()
        };
        let level = Level::parse("@..\nXXX\n", &small_world(), &markers).expect("valid");
        assert!(level.map.solid_at(1, 1));
        assert!(Level::parse("P..\n###\n", &small_world(), &markers).is_err());
    }

    #[test]
    fn fallback_is_explicit() {
        let world = WorldConfig::default();
        let markers = MarkerAlphabet::default();
        let (level, cause) = Level::parse_or_generate("", &world, &markers);
        assert_eq!(cause, Some(LevelError::Empty));
        assert_eq!(level.origin, LevelOrigin::Generated);
        assert!(level.boss_start.is_some());
        assert!(!level.enemies.is_empty());
        let ground = world.rows as i32 - 2;
        assert!((0..world.cols as i32).all(|col| level.map.solid_at(col, ground)));
    }
}
