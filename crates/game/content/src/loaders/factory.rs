//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use platformer_core::{GameConfig, Level};

use crate::loaders::{ConfigLoader, LevelLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (or config.ron)
/// └── levels/
///     ├── level1.txt
///     └── arena.txt
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads `config.toml`, then `config.ron`. With neither present the
    /// built-in defaults are returned.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        for name in ["config.toml", "config.ron"] {
            let path = self.data_dir.join(name);
            if path.is_file() {
                return ConfigLoader::load(&path);
            }
        }
        Ok(GameConfig::default())
    }

    /// Path of `levels/{name}.txt`.
    pub fn level_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("levels").join(format!("{}.txt", name))
    }

    /// Loads `levels/{name}.txt` strictly.
    pub fn load_level(&self, name: &str, config: &GameConfig) -> LoadResult<Level> {
        LevelLoader::load(&self.level_path(name), config)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
