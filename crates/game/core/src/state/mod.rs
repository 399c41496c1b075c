//! Session-wide flags and identifiers.
//!
//! [`GameState`] is passed by reference into every consumer that needs to know
//! whether the simulation is frozen; nothing holds it globally.
mod ids;

pub use ids::{EntityId, Tick};

/// Overlay flags gating the tick loop.
///
/// The flags are independent. While any of them is set the world does not
/// advance, apart from the boss cutscene clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub paused: bool,
    pub game_over: bool,
    pub victory: bool,
}

impl GameState {
    pub const fn new() -> Self {
        Self {
            paused: false,
            game_over: false,
            victory: false,
        }
    }

    /// True when the simulation must not advance this tick.
    #[inline]
    pub const fn any_overlay(&self) -> bool {
        self.paused || self.game_over || self.victory
    }

    /// True once the session reached a terminal screen.
    #[inline]
    pub const fn is_over(&self) -> bool {
        self.game_over || self.victory
    }

    /// Flips `paused` unless the session already ended. Returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.is_over() {
            self.paused = !self.paused;
        }
        self.paused
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_flag_freezes() {
        let mut state = GameState::new();
        assert!(!state.any_overlay());
        state.victory = true;
        assert!(state.any_overlay());
        state.reset();
        assert!(!state.any_overlay());
    }

    #[test]
    fn pause_locked_after_game_over() {
        let mut state = GameState::new();
        assert!(state.toggle_pause());
        assert!(!state.toggle_pause());
        state.game_over = true;
        assert!(!state.toggle_pause());
        assert!(!state.paused);
    }
}
