//! Frame clocks for actor animation states.
//!
//! The simulation never sees sprites. Each state only needs a frame count and
//! a cadence so that keyframes (arrow release, melee damage, death end) land on
//! the same tick the renderer shows them.

/// Timing of one animation strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clip {
    pub frames: u16,
    pub ticks_per_frame: u16,
    pub looping: bool,
}

impl Clip {
    pub const fn looping(frames: u16, ticks_per_frame: u16) -> Self {
        Self {
            frames,
            ticks_per_frame,
            looping: true,
        }
    }

    pub const fn once(frames: u16, ticks_per_frame: u16) -> Self {
        Self {
            frames,
            ticks_per_frame,
            looping: false,
        }
    }

    /// A clip with no frames or a zero cadence never finishes.
    pub const fn is_playable(&self) -> bool {
        self.frames > 0 && self.ticks_per_frame > 0
    }

    pub const fn last_frame(&self) -> u16 {
        self.frames.saturating_sub(1)
    }

    /// Ticks needed to play the clip from the first to past the last frame.
    pub const fn duration(&self) -> u32 {
        self.frames as u32 * self.ticks_per_frame as u32
    }
}

/// Current state id plus frame/tick counters for that state.
///
/// Switching to a different state rewinds to frame 0. Advancing uses the
/// cadence of the clip the caller passes in, so one animator can drive any
/// number of clips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animator<S> {
    state: S,
    frame: u16,
    tick: u32,
}

impl<S: Copy + Eq> Animator<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            frame: 0,
            tick: 0,
        }
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn frame(&self) -> u16 {
        self.frame
    }

    /// Changes state, rewinding only when the state actually differs.
    /// Returns true when a change happened.
    pub fn set(&mut self, state: S) -> bool {
        if self.state == state {
            return false;
        }
        self.restart(state);
        true
    }

    /// Enters `state` at frame 0 even if it is already current.
    pub fn restart(&mut self, state: S) {
        self.state = state;
        self.frame = 0;
        self.tick = 0;
    }

    /// Jumps to a specific frame of the current state.
    pub fn seek(&mut self, frame: u16) {
        self.frame = frame;
        self.tick = 0;
    }

    /// Advances one tick. Returns true when the frame index changed.
    pub fn advance(&mut self, clip: &Clip) -> bool {
        self.tick = self.tick.wrapping_add(1);
        if clip.ticks_per_frame == 0 || self.tick % clip.ticks_per_frame as u32 != 0 {
            return false;
        }
        let next = if clip.looping {
            (self.frame + 1) % clip.frames.max(1)
        } else {
            (self.frame + 1).min(clip.last_frame())
        };
        let changed = next != self.frame;
        self.frame = next;
        changed
    }

    /// Steps one tick backwards through the clip, stopping at frame 0.
    /// Returns true on the tick that reaches frame 0.
    pub fn rewind(&mut self, clip: &Clip) -> bool {
        self.tick = self.tick.wrapping_add(1);
        if clip.ticks_per_frame == 0 || self.tick % clip.ticks_per_frame as u32 != 0 {
            return false;
        }
        self.frame = self.frame.saturating_sub(1);
        self.frame == 0
    }

    /// True on the first tick of the current frame.
    pub fn entering_frame(&self, clip: &Clip) -> bool {
        clip.ticks_per_frame == 0 || self.tick % clip.ticks_per_frame as u32 == 0
    }

    pub fn is_last_frame(&self, clip: &Clip) -> bool {
        self.frame >= clip.last_frame()
    }

    /// A non-looping clip is finished once its last frame is showing.
    pub fn finished(&self, clip: &Clip) -> bool {
        !clip.looping && self.is_last_frame(clip)
    }
}
