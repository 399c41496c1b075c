//! Data-driven content loaders.
//!
//! This crate reads the files a session is built from:
//! - Game tuning (TOML or RON, partial files override defaults)
//! - Level grids (ASCII, one glyph per cell)
//!
//! Everything is converted into `platformer-core` types at load time; the
//! simulation itself never touches the filesystem.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigFormat, ConfigLoader, ContentFactory, LevelLoader, LoadResult};
