use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::{LevelInfo, Result};
use crate::progression::LevelCalculator;

/// Profile record as returned by the bounty API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Signed on the wire; validated before any level math.
    #[serde(default)]
    pub total_xp: i64,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub bounties_completed: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Hunter,
    Company,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hunter => "hunter",
            Role::Company => "company",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hunter" | "user" => Some(Role::Hunter),
            "company" => Some(Role::Company),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl UserProfile {
    pub fn new(id: String, username: String) -> Self {
        Self {
            id,
            username,
            display_name: None,
            total_xp: 0,
            role: Role::Hunter,
            bounties_completed: 0,
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    pub fn level_info(&self) -> Result<LevelInfo> {
        crate::progression::level_info_from_signed(self.total_xp)
    }
}

/// A profile paired with its derived level, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileProgress {
    pub profile: UserProfile,
    pub level: LevelInfo,
}

impl ProfileProgress {
    pub fn from_profile(profile: UserProfile) -> Result<Self> {
        let level = profile.level_info()?;
        Ok(Self { profile, level })
    }

    pub fn with_calculator(profile: UserProfile, calculator: &LevelCalculator) -> Result<Self> {
        let level = calculator.calculate_level_signed(profile.total_xp)?;
        Ok(Self { profile, level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BountyError;

    #[test]
    fn test_profile_deserializes_camel_case() {
        let json = r#"{
            "id": "u42",
            "username": "rustacean",
            "displayName": "Ferris",
            "totalXp": 250,
            "role": "company",
            "bountiesCompleted": 3,
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "u42");
        assert_eq!(profile.name(), "Ferris");
        assert_eq!(profile.total_xp, 250);
        assert_eq!(profile.role, Role::Company);
        assert_eq!(profile.level_info().unwrap().level, 3);
    }

    #[test]
    fn test_profile_defaults_missing_fields() {
        let json = r#"{"id": "u1", "username": "anon", "createdAt": "2024-05-01T12:00:00Z"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.total_xp, 0);
        assert_eq!(profile.role, Role::Hunter);
        assert_eq!(profile.name(), "anon");
    }

    #[test]
    fn test_negative_xp_is_rejected() {
        let mut profile = UserProfile::new("u1".to_string(), "anon".to_string());
        profile.total_xp = -10;
        assert!(matches!(profile.level_info(), Err(BountyError::NegativeXp(-10))));
        assert!(ProfileProgress::from_profile(profile).is_err());
    }

    #[test]
    fn test_progress_with_custom_curve() {
        let mut profile = UserProfile::new("u1".to_string(), "anon".to_string());
        profile.total_xp = 100;
        let calc = LevelCalculator::new(crate::progression::LevelCurve {
            base_xp: 50,
            ..Default::default()
        });
        let progress = ProfileProgress::with_calculator(profile, &calc).unwrap();
        assert_eq!(progress.level.level, 3);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("Hunter"), Some(Role::Hunter));
        assert_eq!(Role::from_str("company"), Some(Role::Company));
        assert_eq!(Role::from_str("moderator"), None);
    }
}
