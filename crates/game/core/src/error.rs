//! Common error infrastructure for platformer-core.
//!
//! Load-time problems (bad tuning values, malformed level grids) are the only
//! failures the core reports as errors. Gameplay races inside a tick, such as
//! a second hit on a dying actor or firing with an empty quiver, are silent
//! no-ops and never reach this module.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller has a documented fallback (e.g. the generated default level).
    Recoverable,

    /// Invalid input that must be fixed before retrying.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// The session cannot start.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all platformer-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejected tuning values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("tile size must be non-zero")]
    ZeroTileSize,

    #[error("world must have at least one cell, got {cols}x{rows}")]
    EmptyWorld { cols: u32, rows: u32 },

    #[error("quiver capacity {capacity} outside 1..={max}")]
    QuiverCapacity { capacity: u8, max: usize },

    #[error("melee combo needs at least one phase")]
    EmptyMeleeCombo,

    #[error("melee phase {phase} spans frames {first}..={last} but the clip has {frames}")]
    MeleePhaseFrames {
        phase: usize,
        first: u16,
        last: u16,
        frames: u16,
    },

    #[error("boss action weights are all zero")]
    ZeroBossWeights,

    #[error("{actor} max health must be non-zero")]
    ZeroHealth { actor: &'static str },

    #[error("{actor} clip `{clip}` needs at least one frame and a non-zero cadence")]
    InvalidClip {
        actor: &'static str,
        clip: &'static str,
    },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroTileSize => "CONFIG_ZERO_TILE_SIZE",
            Self::EmptyWorld { .. } => "CONFIG_EMPTY_WORLD",
            Self::QuiverCapacity { .. } => "CONFIG_QUIVER_CAPACITY",
            Self::EmptyMeleeCombo => "CONFIG_EMPTY_MELEE_COMBO",
            Self::MeleePhaseFrames { .. } => "CONFIG_MELEE_PHASE_FRAMES",
            Self::ZeroBossWeights => "CONFIG_ZERO_BOSS_WEIGHTS",
            Self::ZeroHealth { .. } => "CONFIG_ZERO_HEALTH",
            Self::InvalidClip { .. } => "CONFIG_INVALID_CLIP",
        }
    }
}
