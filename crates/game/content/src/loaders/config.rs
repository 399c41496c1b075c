//! Game configuration loader.
//!
//! Every section of [`GameConfig`] is `#[serde(default)]`, so a tuning file
//! only lists the values it changes. The merged result is validated before it
//! is handed out.

use std::path::Path;

use platformer_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// On-disk encoding of a tuning file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    /// Picks the format from the file extension. Anything but `.ron` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Self::Ron,
            _ => Self::Toml,
        }
    }
}

/// Loader for game configuration from TOML or RON files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a tuning file, choosing the parser by extension.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content, ConfigFormat::from_path(path))
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parses and validates an in-memory tuning document.
    pub fn parse(content: &str, format: ConfigFormat) -> LoadResult<GameConfig> {
        let config: GameConfig = match format {
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?,
            ConfigFormat::Ron => ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config RON: {}", e))?,
        };

        config.validate().map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
        Ok(config)
    }

    /// Renders `config` as a complete TOML document.
    pub fn to_toml(config: &GameConfig) -> LoadResult<String> {
        toml::to_string_pretty(config)
            .map_err(|e| anyhow::anyhow!("Failed to render config TOML: {}", e))
    }

    /// Renders `config` as a complete RON document.
    pub fn to_ron(config: &GameConfig) -> LoadResult<String> {
        ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to render config RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/tuning.ron")), ConfigFormat::Ron);
        assert_eq!(ConfigFormat::from_path(Path::new("a/tuning.RON")), ConfigFormat::Ron);
        assert_eq!(ConfigFormat::from_path(Path::new("a/tuning.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a/tuning")), ConfigFormat::Toml);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ConfigLoader::parse(
            "[player]\nmax_hp = 5\n\n[quiver]\ncapacity = 8\n",
            ConfigFormat::Toml,
        )
        .expect("partial config parses");

        let defaults = GameConfig::default();
        assert_eq!(config.player.max_hp, 5);
        assert_eq!(config.quiver.capacity, 8);
        assert_eq!(config.player.jump_velocity, defaults.player.jump_velocity);
        assert_eq!(config.boss, defaults.boss);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("[quiver]\ncapacity = 0\n", ConfigFormat::Toml)
            .expect_err("empty quiver is invalid");
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let config = ConfigLoader::parse("(seed: 42, player: (max_hp: 4))", ConfigFormat::Ron)
            .expect("partial RON parses");
        assert_eq!(config.seed, 42);
        assert_eq!(config.player.max_hp, 4);
        assert_eq!(config.quiver, GameConfig::default().quiver);
    }
}
