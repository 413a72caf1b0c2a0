use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;
use std::time::Duration;

use crate::progression::LevelCurve;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub api: ApiSettings,
    pub progression: LevelCurve,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    pub access_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Bounty Progress".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
                environment: Environment::Development,
            },
            api: ApiSettings {
                base_url: "http://localhost:3000/api".to_string(),
                timeout_seconds: 30,
                max_retries: 3,
                retry_base_delay_ms: 200,
            },
            progression: LevelCurve::default(),
            session: SessionSettings::default(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("BOUNTY_PROGRESS")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.progression.validate()?;

        if self.api.base_url.trim().is_empty() {
            return Err("API base URL must not be empty".to_string());
        }

        if self.api.max_retries == 0 {
            return Err("API max retries must be at least 1".to_string());
        }

        Ok(())
    }
}
