//! ASCII level loader.
//!
//! Level files are the raw grid, one character per cell, using the marker
//! alphabet from [`GameConfig::markers`]. Lines starting with `;` are comments
//! and are dropped before parsing.

use std::path::Path;

use platformer_core::{GameConfig, Level, LevelError};

use crate::loaders::{LoadResult, read_file};

/// Loader for level grids.
pub struct LevelLoader;

impl LevelLoader {
    /// Loads and parses a level file. Any parse error is returned.
    pub fn load(path: &Path, config: &GameConfig) -> LoadResult<Level> {
        let content = read_file(path)?;
        let level = Self::parse_str(&content, config)
            .map_err(|e| anyhow::anyhow!("Failed to parse level {}: {}", path.display(), e))?;

        tracing::debug!(
            target: "content::level",
            path = %path.display(),
            enemies = level.enemies.len(),
            pickups = level.pickups.len(),
            boss = level.boss_start.is_some(),
            "level loaded"
        );
        Ok(level)
    }

    /// Parses level text that is already in memory, comments included.
    pub fn parse_str(content: &str, config: &GameConfig) -> Result<Level, LevelError> {
        Level::parse(&strip_comments(content), &config.world, &config.markers)
    }

    /// Loads a level, falling back to the generated layout when the file is
    /// absent, unreadable or unusable.
    pub fn load_or_generate(path: Option<&Path>, config: &GameConfig) -> Level {
        let Some(path) = path else {
            tracing::info!(target: "content::level", "no level file given, using generated layout");
            return Level::generate_default(&config.world, &config.markers);
        };

        let content = match read_file(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(target: "content::level", error = %e, "using generated layout");
                return Level::generate_default(&config.world, &config.markers);
            }
        };

        let (level, error) =
            Level::parse_or_generate(&strip_comments(&content), &config.world, &config.markers);
        if let Some(error) = error {
            tracing::warn!(
                target: "content::level",
                path = %path.display(),
                %error,
                "level rejected, using generated layout"
            );
        }
        level
    }
}

fn strip_comments(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.starts_with(';'))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_are_dropped() {
        let stripped = strip_comments("; arena\n..P..\n; floor\n#####\n");
        assert_eq!(stripped, "..P..\n#####");
    }

    #[test]
    fn missing_path_generates() {
        let level = LevelLoader::load_or_generate(None, &GameConfig::default());
        assert_eq!(level.origin, platformer_core::LevelOrigin::Generated);
    }
}
