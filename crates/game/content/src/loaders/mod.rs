//! Content loaders for reading game data from files.
//!
//! Tuning files are TOML or RON and deserialize straight into
//! [`platformer_core::GameConfig`]; levels are plain ASCII grids parsed by
//! [`platformer_core::Level::parse`].

pub mod config;
pub mod factory;
pub mod level;

pub use config::{ConfigFormat, ConfigLoader};
pub use factory::ContentFactory;
pub use level::LevelLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
