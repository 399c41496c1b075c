//! Per-tick input intents.
//!
//! The host samples its devices however it likes and hands the core a set of
//! held [`Intent`]s once per tick. Edges are derived here so that every
//! consumer agrees on what "pressed this tick" means.

bitflags::bitflags! {
    /// Buttons the player is holding during one tick.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Intent: u8 {
        const MOVE_LEFT = 1 << 0;
        const MOVE_RIGHT = 1 << 1;
        const JUMP = 1 << 2;
        const FIRE = 1 << 3;
        const MELEE = 1 << 4;
    }
}

/// Held intents plus the ones that went down this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    held: Intent,
    pressed: Intent,
}

impl InputFrame {
    pub fn new(held: Intent, previous: Intent) -> Self {
        Self {
            held,
            pressed: held & !previous,
        }
    }

    pub fn held(&self, intent: Intent) -> bool {
        self.held.contains(intent)
    }

    /// True only on the tick the intent went from released to held.
    pub fn pressed(&self, intent: Intent) -> bool {
        self.pressed.contains(intent)
    }

    pub fn held_set(&self) -> Intent {
        self.held
    }

    /// -1, 0 or 1. Holding both directions cancels out.
    pub fn horizontal(&self) -> f32 {
        let left = self.held(Intent::MOVE_LEFT);
        let right = self.held(Intent::MOVE_RIGHT);
        match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Remembers the previous tick's intents to produce edge-aware frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputTracker {
    previous: Intent,
}

impl InputTracker {
    pub fn next(&mut self, held: Intent) -> InputFrame {
        let frame = InputFrame::new(held, self.previous);
        self.previous = held;
        frame
    }

    pub fn reset(&mut self) {
        self.previous = Intent::empty();
    }
}
