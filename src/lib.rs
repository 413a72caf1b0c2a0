pub mod models;
pub mod config;
pub mod progression;
pub mod api;
pub mod session;
pub mod tui;

pub use models::{BountyError, LevelInfo, ProfileProgress, Result, UserProfile};
pub use config::Settings;
pub use progression::{calculate_level, total_xp_for_level, xp_for_level, LevelCalculator};
