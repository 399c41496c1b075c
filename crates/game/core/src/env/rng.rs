//! Deterministic randomness for AI decisions.
//!
//! Rolls are a pure function of `(session seed, tick, entity, roll index)`, so
//! a recorded input script replays to the same boss behavior every time.

/// Stateless random source: the same seed always yields the same value.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }

    /// True with probability `percent / 100`.
    fn chance(&self, seed: u64, percent: u32) -> bool {
        self.next_u32(seed) % 100 < percent
    }
}

/// PCG-XSH-RR: one LCG step followed by an xorshift and random rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the seed components with SplitMix-style multipliers and a final
/// avalanche so neighbouring ticks produce unrelated seeds.
pub fn compute_seed(session_seed: u64, tick: u64, entity: u32, roll: u32) -> u64 {
    let mut hash = session_seed;
    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (entity as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (roll as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Sequence of independent rolls for one entity within one tick.
pub struct Rolls<'a> {
    rng: &'a dyn RngOracle,
    session_seed: u64,
    tick: u64,
    entity: u32,
    next: u32,
}

impl<'a> Rolls<'a> {
    pub fn new(rng: &'a dyn RngOracle, session_seed: u64, tick: u64, entity: u32) -> Self {
        Self {
            rng,
            session_seed,
            tick,
            entity,
            next: 0,
        }
    }

    fn seed(&mut self) -> u64 {
        let seed = compute_seed(self.session_seed, self.tick, self.entity, self.next);
        self.next += 1;
        seed
    }

    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        let seed = self.seed();
        self.rng.range(seed, min, max)
    }

    pub fn chance(&mut self, percent: u32) -> bool {
        let seed = self.seed();
        self.rng.chance(seed, percent)
    }

    /// Picks an index with probability proportional to its weight.
    /// Returns `None` when every weight is zero.
    pub fn weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.range(0, total - 1);
        for (index, &weight) in weights.iter().enumerate() {
            if roll < weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_differ_per_component() {
        let base = compute_seed(1, 10, 2, 0);
        assert_ne!(base, compute_seed(1, 11, 2, 0));
        assert_ne!(base, compute_seed(1, 10, 3, 0));
        assert_ne!(base, compute_seed(1, 10, 2, 1));
        assert_eq!(base, compute_seed(1, 10, 2, 0));
    }

    #[test]
    fn weighted_never_picks_zero_weight() {
        let rng = PcgRng;
        for tick in 0..500 {
            let mut rolls = Rolls::new(&rng, 42, tick, 7);
            let pick = rolls.weighted(&[0, 3, 0, 1]).expect("non-zero total");
            assert!(pick == 1 || pick == 3);
        }
        let mut rolls = Rolls::new(&rng, 42, 0, 7);
        assert_eq!(rolls.weighted(&[0, 0]), None);
    }

    #[test]
    fn weighted_roughly_follows_weights() {
        let rng = PcgRng;
        let mut counts = [0u32; 2];
        for tick in 0..4000 {
            let mut rolls = Rolls::new(&rng, 9, tick, 1);
            if let Some(i) = rolls.weighted(&[3, 1]) {
                counts[i] += 1;
            }
        }
        assert!(counts[0] > counts[1] * 2);
    }

    #[test]
    fn range_stays_inclusive() {
        let rng = PcgRng;
        let mut rolls = Rolls::new(&rng, 5, 5, 5);
        for _ in 0..200 {
            let v = rolls.range(60, 120);
            assert!((60..=120).contains(&v));
        }
        assert_eq!(rolls.range(7, 7), 7);
    }
}
