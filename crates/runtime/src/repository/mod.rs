//! Persistence for data that survives a session.
//!
//! The simulation itself is never saved; only the high score is.

mod error;
mod file;
mod memory;
mod traits;

pub use error::StoreError;
pub use file::FileHighScore;
pub use memory::InMemoryHighScore;
pub use traits::HighScoreStore;
