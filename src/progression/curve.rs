use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_XP: u64 = 100;
pub const DEFAULT_TIER_SIZE: u32 = 10;
pub const DEFAULT_TIER_STEP: u64 = 50;

/// Tiered linear XP curve.
///
/// Level `n` belongs to tier `n / tier_size`, so with the defaults levels
/// 1-9 cost 100 XP each, 10-19 cost 150, 20-29 cost 200 and so on. Every
/// level in tier `t` costs `base_xp + t * tier_step` XP to clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCurve {
    pub base_xp: u64,
    pub tier_size: u32,
    pub tier_step: u64,
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base_xp: DEFAULT_BASE_XP,
            tier_size: DEFAULT_TIER_SIZE,
            tier_step: DEFAULT_TIER_STEP,
        }
    }
}

impl LevelCurve {
    pub fn validate(&self) -> Result<(), String> {
        if self.base_xp == 0 {
            return Err("Base XP per level must be greater than 0".to_string());
        }

        if self.tier_size == 0 {
            return Err("Tier size must be at least 1 level".to_string());
        }

        if self.threshold(u32::MAX) < u64::MAX as u128 {
            return Err(format!(
                "Curve reaches level {} before covering every XP total, raise base_xp or tier_step",
                u32::MAX
            ));
        }

        Ok(())
    }

    /// Zero-based tier of `level`. Level 0 is treated as level 1.
    pub fn tier(&self, level: u32) -> u32 {
        level.max(1).checked_div(self.tier_size).unwrap_or(0)
    }

    /// Total XP needed to reach the start of `target_level`, summed per tier.
    pub fn threshold(&self, target_level: u32) -> u128 {
        let levels = target_level.max(1) as u128 - 1;
        let base = self.base_xp as u128;
        let step = self.tier_step as u128;

        // Sum of tier indices over levels 1..=levels.
        let tier_sum = match self.tier_size as u128 {
            0 => 0,
            size => {
                let full_tiers = levels / size;
                let tail = levels % size;
                size * full_tiers * full_tiers.saturating_sub(1) / 2 + full_tiers * (tail + 1)
            }
        };

        levels
            .saturating_mul(base)
            .saturating_add(step.saturating_mul(tier_sum))
    }
}
