//! In-memory HighScoreStore implementation for tests and local runs.

use std::sync::RwLock;

use super::error::{Result, StoreError};
use super::traits::HighScoreStore;

#[derive(Debug, Default)]
pub struct InMemoryHighScore {
    score: RwLock<u64>,
}

impl InMemoryHighScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            score: RwLock::new(score),
        }
    }
}

impl HighScoreStore for InMemoryHighScore {
    fn load(&self) -> Result<u64> {
        let score = self.score.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(*score)
    }

    fn save(&self, score: u64) -> Result<()> {
        let mut stored = self.score.write().map_err(|_| StoreError::LockPoisoned)?;
        *stored = score;
        Ok(())
    }
}
