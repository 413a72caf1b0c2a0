pub mod curve;
pub mod calculator;
pub mod format;
pub mod tracker;

pub use curve::LevelCurve;
pub use calculator::LevelCalculator;
pub use format::{format_level, format_percent, format_xp_progress, progress_bar};
pub use tracker::ProgressTracker;

use crate::models::{LevelInfo, LevelRow, Result};

// Free functions over the default curve.

pub fn xp_for_level(level: u32) -> u64 {
    LevelCalculator::default().xp_for_level(level)
}

pub fn total_xp_for_level(target_level: u32) -> u64 {
    LevelCalculator::default().total_xp_for_level(target_level)
}

pub fn calculate_level(total_xp: u64) -> LevelInfo {
    LevelCalculator::default().calculate_level(total_xp)
}

pub fn level_info_from_signed(total_xp: i64) -> Result<LevelInfo> {
    LevelCalculator::default().calculate_level_signed(total_xp)
}

pub fn level_table(up_to: u32) -> Result<Vec<LevelRow>> {
    LevelCalculator::default().level_table(up_to)
}
