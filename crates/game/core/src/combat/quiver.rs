use arrayvec::ArrayVec;

use crate::config::{GameConfig, QuiverConfig};
use crate::state::GameState;

/// Finite arrow supply where every spent arrow reloads on its own timer.
///
/// `ammo() + pending()` always equals `capacity()`: an arrow is either in the
/// quiver or counting down in exactly one reload slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quiver {
    capacity: u8,
    reload_ticks: u32,
    available: u8,
    reloads: ArrayVec<u32, { GameConfig::MAX_QUIVER_CAPACITY }>,
}

impl Quiver {
    pub fn new(config: &QuiverConfig) -> Self {
        let capacity = config
            .capacity
            .min(GameConfig::MAX_QUIVER_CAPACITY as u8);
        Self {
            capacity,
            reload_ticks: config.reload_ticks,
            available: capacity,
            reloads: ArrayVec::new(),
        }
    }

    pub fn ammo(&self) -> u8 {
        self.available
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    /// Arrows currently reloading.
    pub fn pending(&self) -> usize {
        self.reloads.len()
    }

    /// Remaining ticks of every running reload, in the order they started.
    pub fn reloads(&self) -> &[u32] {
        &self.reloads
    }

    /// Takes one arrow. No-op returning false when empty or frozen.
    pub fn try_consume(&mut self, state: &GameState) -> bool {
        if state.any_overlay() || self.available == 0 {
            return false;
        }
        if self.reloads.try_push(self.reload_ticks).is_err() {
            return false;
        }
        self.available -= 1;
        true
    }

    /// Counts every reload down by one; finished reloads return their arrow.
    pub fn tick(&mut self, state: &GameState) {
        if state.any_overlay() {
            return;
        }
        let mut returned = 0u8;
        self.reloads.retain(|remaining| {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                returned += 1;
                false
            } else {
                true
            }
        });
        self.available = (self.available + returned).min(self.capacity);
    }

    /// Returns up to `count` arrows at once by cancelling the reloads that
    /// are closest to finishing. Returns how many arrows came back.
    pub fn refill(&mut self, count: u8) -> u8 {
        let mut restored = 0;
        while restored < count && !self.reloads.is_empty() {
            let soonest = self
                .reloads
                .iter()
                .enumerate()
                .min_by_key(|(_, remaining)| **remaining)
                .map(|(index, _)| index);
            let Some(index) = soonest else { break };
            self.reloads.remove(index);
            self.available += 1;
            restored += 1;
        }
        restored
    }

    pub fn reset(&mut self) {
        self.reloads.clear();
        self.available = self.capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, RngOracle, compute_seed};

    fn quiver() -> Quiver {
        Quiver::new(&QuiverConfig {
            capacity: 5,
            reload_ticks: 60,
        })
    }

    #[test]
    fn single_arrow_returns_after_reload() {
        let state = GameState::new();
        let mut quiver = quiver();
        assert!(quiver.try_consume(&state));
        assert_eq!(quiver.ammo(), 4);
        for _ in 0..59 {
            quiver.tick(&state);
        }
        assert_eq!(quiver.ammo(), 4);
        quiver.tick(&state);
        assert_eq!(quiver.ammo(), 5);
    }

    #[test]
    fn each_arrow_reloads_independently() {
        let state = GameState::new();
        let mut quiver = quiver();
        quiver.try_consume(&state);
        for _ in 0..30 {
            quiver.tick(&state);
        }
        quiver.try_consume(&state);
        assert_eq!(quiver.ammo(), 3);
        for _ in 0..30 {
            quiver.tick(&state);
        }
        assert_eq!(quiver.ammo(), 4);
        for _ in 0..30 {
            quiver.tick(&state);
        }
        assert_eq!(quiver.ammo(), 5);
    }

    #[test]
    fn empty_or_paused_consume_is_noop() {
        let mut state = GameState::new();
        let mut quiver = quiver();
        for _ in 0..5 {
            assert!(quiver.try_consume(&state));
        }
        assert!(!quiver.try_consume(&state));
        assert_eq!(quiver.ammo(), 0);

        quiver.reset();
        state.paused = true;
        assert!(!quiver.try_consume(&state));
        assert_eq!(quiver.ammo(), 5);
    }

    #[test]
    fn refill_cancels_soonest_reloads() {
        let state = GameState::new();
        let mut quiver = quiver();
        quiver.try_consume(&state);
        quiver.tick(&state);
        quiver.try_consume(&state);
        quiver.try_consume(&state);
        assert_eq!(quiver.refill(2), 2);
        assert_eq!(quiver.ammo(), 4);
        assert_eq!(quiver.reloads(), &[60]);
        assert_eq!(quiver.refill(5), 1);
        assert_eq!(quiver.ammo(), 5);
    }

    #[test]
    fn conservation_holds_for_random_sequences() {
        let rng = PcgRng;
        let state = GameState::new();
        for run in 0..64u64 {
            let mut quiver = quiver();
            for step in 0..400u64 {
                let roll = rng.next_u32(compute_seed(run, step, 0, 0)) % 10;
                match roll {
                    0..=3 => {
                        quiver.try_consume(&state);
                    }
                    4 => {
                        quiver.refill(1);
                    }
                    _ => quiver.tick(&state),
                }
                assert_eq!(
                    quiver.ammo() as usize + quiver.pending(),
                    quiver.capacity() as usize
                );
            }
        }
    }
}
