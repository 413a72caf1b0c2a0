use serde::{Deserialize, Serialize};

/// Progression state derived from a cumulative XP total.
///
/// Always recomputed from the total, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u32,
    /// XP earned past the threshold of every prior level.
    pub current_level_xp: u64,
    /// XP needed to clear `level`.
    pub xp_for_next_level: u64,
    pub progress_percent: f64,
}

impl LevelInfo {
    pub fn xp_remaining(&self) -> u64 {
        self.xp_for_next_level.saturating_sub(self.current_level_xp)
    }
}

/// One row of the level requirements table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRow {
    pub level: u32,
    pub xp_required: u64,
    pub total_xp: u64,
}

/// Result of awarding XP to a user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUp {
    pub previous: LevelInfo,
    pub current: LevelInfo,
}

impl LevelUp {
    pub fn leveled_up(&self) -> bool {
        self.current.level > self.previous.level
    }

    pub fn levels_gained(&self) -> u32 {
        self.current.level.saturating_sub(self.previous.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(level: u32, current: u64) -> LevelInfo {
        LevelInfo {
            level,
            current_level_xp: current,
            xp_for_next_level: 100,
            progress_percent: current as f64 / 100.0,
        }
    }

    #[test]
    fn test_xp_remaining() {
        assert_eq!(info(1, 40).xp_remaining(), 60);
    }

    #[test]
    fn test_level_up_detection() {
        let up = LevelUp { previous: info(1, 90), current: info(3, 10) };
        assert!(up.leveled_up());
        assert_eq!(up.levels_gained(), 2);

        let same = LevelUp { previous: info(2, 10), current: info(2, 50) };
        assert!(!same.leveled_up());
        assert_eq!(same.levels_gained(), 0);
    }
}
