//! Error types raised by high-score stores.

use thiserror::Error;

/// Errors surfaced by [`super::HighScoreStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("no per-user data directory available on this platform")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, StoreError>;
