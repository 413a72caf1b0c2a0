use std::sync::RwLock;

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// Auth tokens for the current user.
///
/// Passed explicitly to the API client instead of living in a global, so
/// tests and the fixture store can run with independent sessions.
#[derive(Debug, Default)]
pub struct Session {
    tokens: RwLock<Tokens>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_access_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_tokens(token, None);
        session
    }

    pub fn set_tokens(&self, access: impl Into<String>, refresh: Option<String>) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.access = Some(access.into());
            tokens.refresh = refresh;
            debug!("Session tokens updated");
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens.read().ok()?.access.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.read().ok()?.refresh.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn clear(&self) {
        if let Ok(mut tokens) = self.tokens.write() {
            *tokens = Tokens::default();
            debug!("Session cleared");
        }
    }
}
