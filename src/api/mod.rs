pub mod client;
pub mod resilience;
pub mod rest;
pub mod mock;

pub use client::{EventRegistry, ProfileSource};
pub use resilience::{retry_with_backoff, RetryConfig};
pub use rest::RestClient;
pub use mock::FixtureStore;
