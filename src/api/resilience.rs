use std::time::Duration;
use tokio::time::sleep;
use tracing::{warn, info, error};

use crate::config::ApiSettings;
use crate::models::Result;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl From<&ApiSettings> for RetryConfig {
    fn from(settings: &ApiSettings) -> Self {
        Self {
            max_attempts: settings.max_retries.max(1),
            base_delay: Duration::from_millis(settings.retry_base_delay_ms),
            ..Default::default()
        }
    }
}

/// Retry with exponential backoff.
///
/// Permanent errors (see [`BountyError::is_permanent`]) are returned
/// immediately without another attempt.
///
/// [`BountyError::is_permanent`]: crate::models::BountyError::is_permanent
pub async fn retry_with_backoff<F, T, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    info!("Operation {} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) if e.is_permanent() => return Err(e),
            Err(e) if attempt >= config.max_attempts => {
                error!("Operation {} failed after {} attempts: {}", operation_name, attempt, e);
                return Err(e);
            }
            Err(e) => {
                warn!("Operation {} failed on attempt {}: {}", operation_name, attempt, e);
                sleep(calculate_delay(config, attempt)).await;
                attempt += 1;
            }
        }
    }
}

fn calculate_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let delay_ms = config.base_delay.as_millis() as f64
        * config.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);

    Duration::from_millis(delay_ms as u64).min(config.max_delay)
}
