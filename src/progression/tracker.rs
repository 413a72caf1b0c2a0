use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::{
    api::ProfileSource,
    models::{ProfileProgress, Result},
    progression::LevelCalculator,
};

/// Loads profiles from a [`ProfileSource`] and attaches their levels.
pub struct ProgressTracker {
    source: Arc<dyn ProfileSource>,
    calculator: LevelCalculator,
}

impl ProgressTracker {
    pub fn new(source: Arc<dyn ProfileSource>, calculator: LevelCalculator) -> Self {
        Self { source, calculator }
    }

    pub fn calculator(&self) -> &LevelCalculator {
        &self.calculator
    }

    pub async fn profile_progress(&self, user_id: &str) -> Result<ProfileProgress> {
        let profile = self.source.fetch_profile(user_id).await?;
        let progress = ProfileProgress::with_calculator(profile, &self.calculator)?;
        info!(
            "User {} is level {} ({}/{} XP)",
            user_id,
            progress.level.level,
            progress.level.current_level_xp,
            progress.level.xp_for_next_level
        );
        Ok(progress)
    }

    /// Fetches all `user_ids` concurrently, one result per id in order.
    pub async fn batch_progress(&self, user_ids: &[String]) -> Vec<Result<ProfileProgress>> {
        info!("Fetching progress for {} users", user_ids.len());
        join_all(user_ids.iter().map(|id| self.profile_progress(id))).await
    }

    /// Every profile the source lists, in source order. Profiles with an
    /// invalid XP total are skipped.
    pub async fn leaderboard(&self) -> Result<Vec<ProfileProgress>> {
        let profiles = self.source.list_profiles().await?;

        let rows = profiles
            .into_iter()
            .filter_map(|profile| {
                let id = profile.id.clone();
                match ProfileProgress::with_calculator(profile, &self.calculator) {
                    Ok(progress) => Some(progress),
                    Err(e) => {
                        warn!("Skipping profile {}: {}", id, e);
                        None
                    }
                }
            })
            .collect();

        Ok(rows)
    }
}
