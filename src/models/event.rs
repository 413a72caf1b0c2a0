use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::{BountyError, Result};

/// Community event with a fixed number of registration slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub capacity: u32,
    #[serde(default)]
    pub registered_user_ids: Vec<String>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn new(id: String, title: String, capacity: u32) -> Self {
        Self {
            id,
            title,
            capacity,
            registered_user_ids: Vec::new(),
            starts_at: None,
        }
    }

    pub fn registered_count(&self) -> u32 {
        self.registered_user_ids.len() as u32
    }

    pub fn remaining_slots(&self) -> u32 {
        self.capacity.saturating_sub(self.registered_count())
    }

    pub fn is_full(&self) -> bool {
        self.registered_count() >= self.capacity
    }

    pub fn is_registered(&self, user_id: &str) -> bool {
        self.registered_user_ids.iter().any(|id| id == user_id)
    }

    /// Adds `user_id` if there is a free slot and they are not already in.
    pub fn register(&mut self, user_id: &str) -> Result<()> {
        if self.is_registered(user_id) {
            return Err(BountyError::AlreadyRegistered {
                event_id: self.id.clone(),
                user_id: user_id.to_string(),
            });
        }

        if self.is_full() {
            return Err(BountyError::EventFull {
                event_id: self.id.clone(),
                capacity: self.capacity,
            });
        }

        self.registered_user_ids.push(user_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_until_full() {
        let mut event = Event::new("ev1".to_string(), "Rust meetup".to_string(), 2);
        assert_eq!(event.remaining_slots(), 2);

        event.register("alice").unwrap();
        event.register("bob").unwrap();
        assert!(event.is_full());
        assert_eq!(event.remaining_slots(), 0);

        let err = event.register("carol").unwrap_err();
        assert!(matches!(err, BountyError::EventFull { capacity: 2, .. }));
        assert_eq!(event.registered_count(), 2);
    }

    #[test]
    fn test_duplicate_registration() {
        let mut event = Event::new("ev1".to_string(), "Rust meetup".to_string(), 5);
        event.register("alice").unwrap();

        let err = event.register("alice").unwrap_err();
        assert!(matches!(err, BountyError::AlreadyRegistered { .. }));
        assert_eq!(event.registered_count(), 1);
    }

    #[test]
    fn test_duplicate_reported_before_full() {
        let mut event = Event::new("ev1".to_string(), "Tiny".to_string(), 1);
        event.register("alice").unwrap();
        assert!(matches!(
            event.register("alice"),
            Err(BountyError::AlreadyRegistered { .. })
        ));
    }

    #[test]
    fn test_zero_capacity_event() {
        let mut event = Event::new("ev0".to_string(), "Closed".to_string(), 0);
        assert!(event.is_full());
        assert!(event.register("alice").is_err());
    }
}
