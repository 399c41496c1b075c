//! Persistence contract for the single value that outlives a session.

use super::error::Result;

/// Storage for the best score.
///
/// The runtime reads it once while building and writes it once when a
/// session ends above the stored value.
pub trait HighScoreStore: Send + Sync {
    /// Returns the stored score, `0` when nothing was saved yet.
    fn load(&self) -> Result<u64>;

    fn save(&self, score: u64) -> Result<()>;
}
