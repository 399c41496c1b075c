/// Fraction of damage still taken per armor stack.
pub const ARMOR_FACTOR: f32 = 0.75;

pub const MAX_ARMOR_STACKS: u8 = 3;

/// Integer hit points with a fixed maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    pub current: u32,
    pub maximum: u32,
}

impl Health {
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Subtracts `amount`, saturating at zero. Returns the HP actually lost.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// Restores up to `amount` without exceeding the maximum. Returns the HP gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.maximum - self.current);
        self.current += gained;
        gained
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    pub fn ratio(&self) -> f32 {
        if self.maximum == 0 {
            return 0.0;
        }
        self.current as f32 / self.maximum as f32
    }
}

/// Damage multiplier for the given stack count: `0.75^stacks`.
pub fn armor_multiplier(stacks: u8) -> f32 {
    ARMOR_FACTOR.powi(stacks.min(MAX_ARMOR_STACKS) as i32)
}

/// Stack count a boss should hold at the given HP ratio.
pub fn stacks_for_ratio(ratio: f32) -> u8 {
    if ratio <= 0.25 {
        3
    } else if ratio <= 0.50 {
        2
    } else if ratio <= 0.75 {
        1
    } else {
        0
    }
}

/// `raw` reduced by the armor multiplier, rounded, never below 1 for a real hit.
pub fn discounted_damage(raw: u32, stacks: u8) -> u32 {
    if raw == 0 {
        return 0;
    }
    let scaled = (raw as f32 * armor_multiplier(stacks)).round() as u32;
    scaled.max(1)
}

/// Outcome of one hit against an armored target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmorHit {
    pub dealt: u32,
    /// Set when this hit pushed the target across a new threshold.
    pub new_stacks: Option<u8>,
}

/// Damage reduction that escalates at 75/50/25% HP and never decreases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    stacks: u8,
}

impl Armor {
    pub fn stacks(&self) -> u8 {
        self.stacks
    }

    pub fn multiplier(&self) -> f32 {
        armor_multiplier(self.stacks)
    }

    /// Applies `raw` at the current stack count, then re-evaluates thresholds.
    ///
    /// The hit that crosses a threshold is discounted by the old stack count;
    /// only later hits see the new one.
    pub fn strike(&mut self, health: &mut Health, raw: u32) -> ArmorHit {
        let dealt = health.damage(discounted_damage(raw, self.stacks));
        let target = stacks_for_ratio(health.ratio());
        let new_stacks = if target > self.stacks {
            self.stacks = target;
            Some(target)
        } else {
            None
        };
        ArmorHit { dealt, new_stacks }
    }

    pub fn reset(&mut self) {
        self.stacks = 0;
    }
}
