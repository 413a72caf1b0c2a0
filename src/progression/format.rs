use crate::models::LevelInfo;

pub fn format_level(level: u32) -> String {
    format!("Level {}", level)
}

pub fn format_xp_progress(info: &LevelInfo) -> String {
    format!("{} / {} XP", info.current_level_xp, info.xp_for_next_level)
}

/// Whole-number percentage, rounded down so 99.9% never shows as 100%.
pub fn format_percent(info: &LevelInfo) -> String {
    format!("{}%", (info.progress_percent * 100.0).floor() as u32)
}

/// Text progress bar of `width` cells, e.g. `[#####-----]`.
pub fn progress_bar(info: &LevelInfo, width: usize) -> String {
    let filled = ((info.progress_percent * width as f64).floor() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
