use std::sync::Arc;

use async_trait::async_trait;
use mockall::{mock, predicate::eq};

use bounty_progress::{
    api::{EventRegistry, FixtureStore, ProfileSource},
    calculate_level, total_xp_for_level, xp_for_level,
    models::{BountyError, Result, UserProfile},
    progression::{format_level, format_xp_progress, level_info_from_signed, LevelCalculator, ProgressTracker},
};

mock! {
    pub Source {}

    #[async_trait]
    impl ProfileSource for Source {
        async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile>;
        async fn list_profiles(&self) -> Result<Vec<UserProfile>>;
    }
}

fn profile(id: &str, xp: i64) -> UserProfile {
    let mut profile = UserProfile::new(id.to_string(), format!("hunter_{}", id));
    profile.total_xp = xp;
    profile
}

#[test]
fn test_level_requirements() {
    assert_eq!(xp_for_level(1), 100);
    assert_eq!(xp_for_level(9), 100);
    assert_eq!(xp_for_level(10), 150);
    assert_eq!(xp_for_level(20), 200);
    assert_eq!(xp_for_level(31), 250);
}

#[test]
fn test_level_boundaries() {
    let zero = calculate_level(0);
    assert_eq!((zero.level, zero.current_level_xp, zero.xp_for_next_level), (1, 0, 100));
    assert_eq!(zero.progress_percent, 0.0);

    let almost = calculate_level(99);
    assert_eq!((almost.level, almost.current_level_xp, almost.xp_for_next_level), (1, 99, 100));
    assert!((almost.progress_percent - 0.99).abs() < 1e-9);

    let second = calculate_level(100);
    assert_eq!((second.level, second.current_level_xp, second.xp_for_next_level), (2, 0, 100));
}

#[test]
fn test_round_trip_and_tier_transition() {
    for target in 1..200 {
        let info = calculate_level(total_xp_for_level(target));
        assert_eq!(info.level, target);
        assert_eq!(info.current_level_xp, 0);
    }

    assert_eq!(calculate_level(total_xp_for_level(10)).xp_for_next_level, 150);
}

#[test]
fn test_level_is_monotonic_in_xp() {
    let mut previous = calculate_level(0);
    for total in 1..10_000u64 {
        let info = calculate_level(total);
        assert!(info.level >= previous.level);
        assert!(info.progress_percent >= 0.0 && info.progress_percent < 1.0);
        previous = info;
    }
}

#[test]
fn test_negative_xp_rejected() {
    assert!(matches!(level_info_from_signed(-1), Err(BountyError::NegativeXp(-1))));
}

#[test]
fn test_formatting() {
    let info = calculate_level(350);
    assert_eq!(format_level(info.level), "Level 4");
    assert_eq!(format_xp_progress(&info), "50 / 100 XP");
}

#[tokio::test]
async fn test_tracker_with_mocked_source() {
    let mut source = MockSource::new();
    source
        .expect_fetch_profile()
        .with(eq("u1"))
        .times(1)
        .returning(|id| Ok(profile(id, 1_200)));

    let tracker = ProgressTracker::new(Arc::new(source), LevelCalculator::default());
    let progress = tracker.profile_progress("u1").await.unwrap();

    assert_eq!(progress.profile.username, "hunter_u1");
    assert_eq!(progress.level.level, 12);
    assert_eq!(progress.level.current_level_xp, 0);
}

#[tokio::test]
async fn test_tracker_propagates_source_errors() {
    let mut source = MockSource::new();
    source
        .expect_fetch_profile()
        .returning(|_| Err(BountyError::Unauthorized));

    let tracker = ProgressTracker::new(Arc::new(source), LevelCalculator::default());
    assert!(matches!(
        tracker.profile_progress("u1").await,
        Err(BountyError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_leaderboard_with_mocked_source() {
    let mut source = MockSource::new();
    source
        .expect_list_profiles()
        .returning(|| Ok(vec![profile("a", 2_400), profile("bad", -5), profile("b", 0)]));

    let tracker = ProgressTracker::new(Arc::new(source), LevelCalculator::default());
    let rows = tracker.leaderboard().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].level.level, 20);
    assert_eq!(rows[1].level.level, 1);
}

#[tokio::test]
async fn test_fixture_event_quota() {
    let store = Arc::new(FixtureStore::seeded(3));

    let event = store.get_event("ev-hackathon").await.unwrap();
    assert_eq!(event.capacity, 3);

    for user in ["user-1", "user-2", "user-3"] {
        store.register_for_event("ev-hackathon", user).await.unwrap();
    }

    let err = store.register_for_event("ev-hackathon", "user-4").await.unwrap_err();
    assert!(matches!(err, BountyError::EventFull { capacity: 3, .. }));
    assert_eq!(store.get_event("ev-hackathon").await.unwrap().remaining_slots(), 0);
}
