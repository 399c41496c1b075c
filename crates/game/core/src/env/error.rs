//! Level loading errors.
//!
//! A level that cannot produce a player start is unusable, so every variant
//! is reported at load time. Callers that prefer to keep going can ask for
//! the generated default layout instead (see [`super::Level::parse_or_generate`]).

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelError {
    /// The source contained no grid rows.
    #[error("level grid is empty")]
    Empty,

    /// More rows than the configured world height.
    #[error("level has {found} rows but the world holds {max}")]
    TooManyRows { found: u32, max: u32 },

    /// A row is wider than the configured world.
    #[error("row {row} has {found} cells but the world holds {max}")]
    RowTooWide { row: u32, found: u32, max: u32 },

    /// A character that is neither terrain nor a known marker.
    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: u32, col: u32 },

    /// No player start marker anywhere in the grid.
    #[error("level has no player start marker {marker:?}")]
    MissingPlayerStart { marker: char },

    /// A unique marker appeared twice.
    #[error("marker {marker:?} appears again at row {row}, column {col}")]
    DuplicateMarker { marker: char, row: u32, col: u32 },
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        use LevelError::*;
        match self {
            Empty | MissingPlayerStart { .. } => ErrorSeverity::Recoverable,
            TooManyRows { .. }
            | RowTooWide { .. }
            | UnknownGlyph { .. }
            | DuplicateMarker { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use LevelError::*;
        match self {
            Empty => "LEVEL_EMPTY",
            TooManyRows { .. } => "LEVEL_TOO_MANY_ROWS",
            RowTooWide { .. } => "LEVEL_ROW_TOO_WIDE",
            UnknownGlyph { .. } => "LEVEL_UNKNOWN_GLYPH",
            MissingPlayerStart { .. } => "LEVEL_MISSING_PLAYER_START",
            DuplicateMarker { .. } => "LEVEL_DUPLICATE_MARKER",
        }
    }
}
