use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::api::client::{EventRegistry, ProfileSource};
use crate::models::{BountyError, Event, LevelUp, Result, Role, UserProfile};
use crate::progression::LevelCalculator;

const FIXTURE_USERNAMES: &[&str] = &[
    "ferris", "bughunter", "patchwork", "nullpointer", "segfault",
    "borrowck", "lifetimes", "zerocost", "fearless", "unsafe_cell",
];

const FIXTURE_EVENTS: &[(&str, &str, u32)] = &[
    ("ev-hackathon", "Weekend Hackathon", 3),
    ("ev-audit", "Smart Contract Audit Sprint", 1),
    ("ev-meetup", "Bounty Hunters Meetup", 25),
];

/// In-memory stand-in for the bounty API, used for local development
/// and tests.
///
/// Each store owns its own data; create one per context rather than
/// sharing a global.
#[derive(Debug, Default)]
pub struct FixtureStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
    events: RwLock<HashMap<String, Event>>,
    calculator: LevelCalculator,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `calculator` for level math in [`award_xp`](Self::award_xp).
    pub fn with_calculator(mut self, calculator: LevelCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Store filled with generated profiles and events. The same seed
    /// always produces the same data.
    pub fn seeded(seed: u64) -> Self {
        let store = Self::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);

        for (i, username) in FIXTURE_USERNAMES.iter().enumerate() {
            let role = match i % 5 {
                0 => Role::Company,
                _ => Role::Hunter,
            };
            store.insert_profile(UserProfile {
                id: format!("user-{}", i + 1),
                username: username.to_string(),
                display_name: None,
                total_xp: rng.gen_range(0..6_000),
                role,
                bounties_completed: rng.gen_range(0..40),
                created_at: epoch + Duration::days(rng.gen_range(0..365)),
            });
        }

        for (id, title, capacity) in FIXTURE_EVENTS {
            store.insert_event(Event::new(id.to_string(), title.to_string(), *capacity));
        }

        info!(
            "Seeded fixture store with {} profiles and {} events",
            FIXTURE_USERNAMES.len(),
            FIXTURE_EVENTS.len()
        );
        store
    }

    pub fn insert_profile(&self, profile: UserProfile) {
        if let Ok(mut profiles) = self.profiles.write() {
            profiles.insert(profile.id.clone(), profile);
        }
    }

    pub fn insert_event(&self, event: Event) {
        if let Ok(mut events) = self.events.write() {
            events.insert(event.id.clone(), event);
        }
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.read().map(|p| p.len()).unwrap_or(0)
    }

    /// Adds XP to a user's total and reports any level change.
    pub fn award_xp(&self, user_id: &str, amount: u64) -> Result<LevelUp> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| BountyError::LockPoisoned("profile store"))?;
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| BountyError::UserNotFound(user_id.to_string()))?;

        let previous = self.calculator.calculate_level_signed(profile.total_xp)?;
        let amount = i64::try_from(amount).unwrap_or(i64::MAX);
        profile.total_xp = profile.total_xp.saturating_add(amount);
        let current = self.calculator.calculate_level_signed(profile.total_xp)?;

        let result = LevelUp { previous, current };
        if result.leveled_up() {
            info!("{} reached level {}", profile.username, current.level);
        }
        Ok(result)
    }
}

#[async_trait]
impl ProfileSource for FixtureStore {
    async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile> {
        debug!("Fixture lookup for {}", user_id);
        self.profiles
            .read()
            .map_err(|_| BountyError::LockPoisoned("profile store"))?
            .get(user_id)
            .cloned()
            .ok_or_else(|| BountyError::UserNotFound(user_id.to_string()))
    }

    /// Profiles ordered by XP, highest first.
    async fn list_profiles(&self) -> Result<Vec<UserProfile>> {
        let mut profiles: Vec<UserProfile> = self
            .profiles
            .read()
            .map_err(|_| BountyError::LockPoisoned("profile store"))?
            .values()
            .cloned()
            .collect();
        profiles.sort_by(|a, b| b.total_xp.cmp(&a.total_xp).then_with(|| a.username.cmp(&b.username)));
        Ok(profiles)
    }
}

#[async_trait]
impl EventRegistry for FixtureStore {
    async fn get_event(&self, event_id: &str) -> Result<Event> {
        self.events
            .read()
            .map_err(|_| BountyError::LockPoisoned("event store"))?
            .get(event_id)
            .cloned()
            .ok_or_else(|| BountyError::EventNotFound(event_id.to_string()))
    }

    async fn register_for_event(&self, event_id: &str, user_id: &str) -> Result<Event> {
        self.fetch_profile(user_id).await?;

        let mut events = self
            .events
            .write()
            .map_err(|_| BountyError::LockPoisoned("event store"))?;
        let event = events
            .get_mut(event_id)
            .ok_or_else(|| BountyError::EventNotFound(event_id.to_string()))?;

        event.register(user_id)?;
        info!("{} registered for {} ({} slots left)", user_id, event_id, event.remaining_slots());
        Ok(event.clone())
    }
}
