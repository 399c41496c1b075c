//! Utility functions for xtask commands

use std::path::Path;

use anyhow::Result;
use platformer_content::ConfigLoader;
use platformer_core::GameConfig;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so command output stays pipeable. `RUST_LOG` overrides
/// the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Loads a tuning file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => ConfigLoader::load(path),
        None => Ok(GameConfig::default()),
    }
}
