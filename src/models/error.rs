use thiserror::Error;

#[derive(Error, Debug)]
pub enum BountyError {
    #[error("XP total cannot be negative: {0}")]
    NegativeXp(i64),

    #[error("Invalid level: {0}")]
    InvalidLevel(u32),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Not authorized, sign in again")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Event {event_id} is full ({capacity} slots)")]
    EventFull { event_id: String, capacity: u32 },

    #[error("User {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { event_id: String, user_id: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not a valid resource id: {0:?}")]
    InvalidId(String),

    #[error("{0} lock poisoned by a panicked writer")]
    LockPoisoned(&'static str),
}

impl BountyError {
    /// Errors that will not change on a second attempt.
    pub fn is_permanent(&self) -> bool {
        match self {
            BountyError::Api { status, .. } => *status < 500 && *status != 429,
            BountyError::HttpError(e) => e.is_builder() || e.is_decode(),
            _ => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, BountyError>;
