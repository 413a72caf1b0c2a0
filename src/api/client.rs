use async_trait::async_trait;

use crate::models::{Event, Result, UserProfile};

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch a single profile by user id
    async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile>;

    /// Fetch every profile visible to the current session
    async fn list_profiles(&self) -> Result<Vec<UserProfile>>;
}

#[async_trait]
pub trait EventRegistry: Send + Sync {
    async fn get_event(&self, event_id: &str) -> Result<Event>;

    /// Register `user_id` for an event, returning the updated event
    async fn register_for_event(&self, event_id: &str, user_id: &str) -> Result<Event>;
}
