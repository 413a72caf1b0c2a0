use crate::models::{BountyError, LevelInfo, LevelRow, LevelUp, Result};
use crate::progression::LevelCurve;

/// Converts cumulative XP totals into levels along a [`LevelCurve`].
///
/// Holds no state beyond the curve constants, so a single calculator can be
/// shared freely between tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCalculator {
    curve: LevelCurve,
}

impl LevelCalculator {
    pub fn new(curve: LevelCurve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }

    /// XP required to clear `level` and advance to `level + 1`.
    pub fn xp_for_level(&self, level: u32) -> u64 {
        let tier = self.curve.tier(level) as u64;
        self.curve
            .base_xp
            .saturating_add(tier.saturating_mul(self.curve.tier_step))
    }

    /// Total XP needed to reach the start of `target_level`.
    ///
    /// Equal to summing `xp_for_level` over `1..target_level`, evaluated
    /// tier by tier instead of level by level.
    pub fn total_xp_for_level(&self, target_level: u32) -> u64 {
        u64::try_from(self.threshold(target_level)).unwrap_or(u64::MAX)
    }

    fn threshold(&self, target_level: u32) -> u128 {
        self.curve.threshold(target_level)
    }

    /// Derives level, in-level XP and progress from a cumulative total.
    ///
    /// The level is the highest one whose threshold fits in `total_xp`,
    /// which is where peeling off one level cost at a time would stop.
    /// Curves that run out of levels before `total_xp` park the surplus in
    /// the last level, just short of completing it.
    pub fn calculate_level(&self, total_xp: u64) -> LevelInfo {
        let total = total_xp as u128;
        let (mut low, mut high) = (1u32, u32::MAX);

        while low < high {
            let mid = low + (high - low) / 2 + 1;
            if self.threshold(mid) <= total {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        let level = low;
        let xp_for_next_level = self.xp_for_level(level);
        let current_level_xp = u64::try_from(total - self.threshold(level))
            .unwrap_or(u64::MAX)
            .min(xp_for_next_level.saturating_sub(1));
        let progress_percent = if xp_for_next_level == 0 {
            0.0
        } else {
            current_level_xp as f64 / xp_for_next_level as f64
        };

        LevelInfo {
            level,
            current_level_xp,
            xp_for_next_level,
            progress_percent,
        }
    }

    /// Same as [`calculate_level`](Self::calculate_level) for totals that
    /// arrive signed, e.g. from the API. Negative totals are rejected.
    pub fn calculate_level_signed(&self, total_xp: i64) -> Result<LevelInfo> {
        let total = u64::try_from(total_xp).map_err(|_| BountyError::NegativeXp(total_xp))?;
        Ok(self.calculate_level(total))
    }

    pub fn award(&self, total_xp: u64, amount: u64) -> LevelUp {
        LevelUp {
            previous: self.calculate_level(total_xp),
            current: self.calculate_level(total_xp.saturating_add(amount)),
        }
    }

    /// Requirement rows for levels `1..=up_to`.
    pub fn level_table(&self, up_to: u32) -> Result<Vec<LevelRow>> {
        if up_to == 0 {
            return Err(BountyError::InvalidLevel(up_to));
        }

        let mut total_xp = 0u64;
        let rows = (1..=up_to)
            .map(|level| {
                let row = LevelRow {
                    level,
                    xp_required: self.xp_for_level(level),
                    total_xp,
                };
                total_xp = total_xp.saturating_add(row.xp_required);
                row
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> LevelCalculator {
        LevelCalculator::default()
    }

    /// Level-by-level reference walk used to check the search in `calculate_level`.
    fn naive_level(calc: &LevelCalculator, total_xp: u64) -> (u32, u64) {
        let mut level = 1;
        let mut remaining = total_xp;
        while remaining >= calc.xp_for_level(level) {
            remaining -= calc.xp_for_level(level);
            level += 1;
        }
        (level, remaining)
    }

    #[test]
    fn test_xp_for_level() {
        let calc = calc();
        assert_eq!(calc.xp_for_level(1), 100);
        assert_eq!(calc.xp_for_level(9), 100);
        assert_eq!(calc.xp_for_level(10), 150);
        assert_eq!(calc.xp_for_level(19), 150);
        assert_eq!(calc.xp_for_level(20), 200);
        assert_eq!(calc.xp_for_level(31), 250);
    }

    #[test]
    fn test_xp_for_level_is_monotonic() {
        let calc = calc();
        for level in 1..500 {
            assert!(calc.xp_for_level(level) <= calc.xp_for_level(level + 1));
        }
    }

    #[test]
    fn test_total_xp_matches_summation() {
        let calc = calc();
        for target in 1..300u32 {
            let summed: u64 = (1..target).map(|l| calc.xp_for_level(l)).sum();
            assert_eq!(calc.total_xp_for_level(target), summed, "target level {}", target);
        }
    }

    #[test]
    fn test_total_xp_known_values() {
        let calc = calc();
        assert_eq!(calc.total_xp_for_level(1), 0);
        assert_eq!(calc.total_xp_for_level(2), 100);
        assert_eq!(calc.total_xp_for_level(10), 900);
        assert_eq!(calc.total_xp_for_level(11), 1050);
        assert_eq!(calc.total_xp_for_level(20), 2400);
    }

    #[test]
    fn test_boundaries() {
        let calc = calc();

        let info = calc.calculate_level(0);
        assert_eq!(info.level, 1);
        assert_eq!(info.current_level_xp, 0);
        assert_eq!(info.xp_for_next_level, 100);
        assert_eq!(info.progress_percent, 0.0);

        let info = calc.calculate_level(99);
        assert_eq!(info.level, 1);
        assert_eq!(info.current_level_xp, 99);
        assert_eq!(info.xp_for_next_level, 100);
        assert!((info.progress_percent - 0.99).abs() < 1e-9);

        let info = calc.calculate_level(100);
        assert_eq!(info.level, 2);
        assert_eq!(info.current_level_xp, 0);
        assert_eq!(info.xp_for_next_level, 100);
        assert_eq!(info.progress_percent, 0.0);
    }

    #[test]
    fn test_tier_transition() {
        let calc = calc();
        let info = calc.calculate_level(calc.total_xp_for_level(10));
        assert_eq!(info.level, 10);
        assert_eq!(info.xp_for_next_level, 150);

        let info = calc.calculate_level(calc.total_xp_for_level(10) - 1);
        assert_eq!(info.level, 9);
        assert_eq!(info.current_level_xp, 99);
    }

    #[test]
    fn test_round_trip() {
        let calc = calc();
        for target in 1..1000 {
            let info = calc.calculate_level(calc.total_xp_for_level(target));
            assert_eq!(info.level, target);
            assert_eq!(info.current_level_xp, 0);
        }
    }

    #[test]
    fn test_matches_level_by_level_walk() {
        let calc = calc();
        for total in (0..60_000).step_by(37) {
            let info = calc.calculate_level(total);
            assert_eq!((info.level, info.current_level_xp), naive_level(&calc, total));
        }
    }

    #[test]
    fn test_invariants_hold() {
        let calc = calc();
        let mut last_level = 1;
        for total in (0..20_000).step_by(13) {
            let info = calc.calculate_level(total);
            assert!(info.level >= last_level);
            assert!(info.current_level_xp < info.xp_for_next_level);
            assert!(info.progress_percent >= 0.0 && info.progress_percent < 1.0);
            assert_eq!(calc.total_xp_for_level(info.level) + info.current_level_xp, total);
            last_level = info.level;
        }
    }

    #[test]
    fn test_huge_totals_terminate() {
        let calc = calc();
        let info = calc.calculate_level(u64::MAX);
        assert!(info.level > 1);
        assert!(info.current_level_xp < info.xp_for_next_level);
    }

    #[test]
    fn test_signed_input() {
        let calc = calc();
        assert_eq!(calc.calculate_level_signed(250).unwrap().level, 3);
        assert!(matches!(
            calc.calculate_level_signed(-1),
            Err(BountyError::NegativeXp(-1))
        ));
    }

    #[test]
    fn test_award() {
        let calc = calc();
        let result = calc.award(90, 20);
        assert!(result.leveled_up());
        assert_eq!(result.current.level, 2);
        assert_eq!(result.current.current_level_xp, 10);

        assert!(!calc.award(0, 50).leveled_up());
    }

    #[test]
    fn test_level_table() {
        let calc = calc();
        let rows = calc.level_table(11).unwrap();
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0], LevelRow { level: 1, xp_required: 100, total_xp: 0 });
        assert_eq!(rows[9], LevelRow { level: 10, xp_required: 150, total_xp: 900 });
        assert_eq!(rows[10].total_xp, 1050);

        assert!(matches!(calc.level_table(0), Err(BountyError::InvalidLevel(0))));
    }

    #[test]
    fn test_custom_curve() {
        let calc = LevelCalculator::new(LevelCurve { base_xp: 10, tier_size: 2, tier_step: 5 });
        // Level 1: 10, levels 2-3: 15, levels 4-5: 20
        assert_eq!(calc.xp_for_level(1), 10);
        assert_eq!(calc.xp_for_level(2), 15);
        assert_eq!(calc.xp_for_level(4), 20);
        assert_eq!(calc.total_xp_for_level(5), 10 + 15 + 15 + 20);
        assert_eq!(calc.calculate_level(40).level, 4);
    }

    #[test]
    fn test_flat_curve_saturates_at_last_level() {
        let calc = LevelCalculator::new(LevelCurve { base_xp: 100, tier_size: 10, tier_step: 0 });

        let info = calc.calculate_level(1_000_000_000_000);
        assert_eq!(info.level, u32::MAX);
        assert_eq!(info.current_level_xp, 99);
        assert_eq!(info.xp_for_next_level, 100);
        assert!(info.progress_percent < 1.0);

        let info = calc.calculate_level(u64::MAX);
        assert!(info.current_level_xp < info.xp_for_next_level);
    }

    #[test]
    fn test_zero_cost_curve_reports_no_progress() {
        let calc = LevelCalculator::new(LevelCurve { base_xp: 0, tier_size: 10, tier_step: 0 });
        let info = calc.calculate_level(500);
        assert_eq!(info.level, u32::MAX);
        assert_eq!(info.current_level_xp, 0);
        assert_eq!(info.progress_percent, 0.0);
    }
}
