//! File-based HighScoreStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{Result, StoreError};
use super::traits::HighScoreStore;

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

/// Keeps the high score in a small JSON document.
///
/// # File Format
///
/// ```json
/// { "high_score": 4200 }
/// ```
///
/// A missing file reads as `0`. Writes go to a temp file first and are
/// renamed into place.
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `highscore.json` in the per-user data directory.
    pub fn in_data_dir() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "platformer").ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("highscore.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }

        let bytes = fs::read(&self.path)?;
        let record: HighScoreRecord =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Json(e.to_string()))?;

        tracing::debug!(
            target: "runtime::store",
            path = %self.path.display(),
            score = record.high_score,
            "loaded high score"
        );
        Ok(record.high_score)
    }

    fn save(&self, score: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(&HighScoreRecord { high_score: score })
            .map_err(|e| StoreError::Json(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            target: "runtime::store",
            path = %self.path.display(),
            score,
            "saved high score"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileHighScore::new(dir.path().join("scores/best.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn save_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileHighScore::new(dir.path().join("scores/best.json"));
        store.save(900).unwrap();
        assert_eq!(store.load().unwrap(), 900);
        assert!(!dir.path().join("scores/best.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            FileHighScore::new(&path).load(),
            Err(StoreError::Json(_))
        ));
    }
}
