use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::client::{EventRegistry, ProfileSource};
use crate::api::resilience::{retry_with_backoff, RetryConfig};
use crate::config::ApiSettings;
use crate::models::{BountyError, Event, Result, UserProfile};
use crate::session::Session;

/// What a request was about, used to turn 404/409 into typed errors.
#[derive(Debug, Clone, Copy)]
enum Resource<'a> {
    User(&'a str),
    Users,
    Event(&'a str),
    Registration { event_id: &'a str, user_id: &'a str },
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    user_id: &'a str,
}

/// Client for the bounty marketplace REST API.
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
    retry: RetryConfig,
}

impl RestClient {
    pub fn new(settings: &ApiSettings, session: Arc<Session>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;

        let base_url = Url::parse(settings.base_url.trim_end_matches('/'))
            .map_err(|e| BountyError::ConfigError(format!("Invalid API base URL {}: {}", settings.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(BountyError::ConfigError(format!(
                "API base URL {} cannot hold a path",
                settings.base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            session,
            retry: RetryConfig::from(settings),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends `segments` to the base URL, percent-encoding each one so an
    /// id can never introduce extra path segments or a query.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BountyError::ConfigError(format!("API base URL {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url, resource: Resource<'_>) -> Result<T> {
        debug!("GET {}", url);
        let response = self.authorized(self.http.get(url.clone())).send().await?;
        read_json(response, resource).await
    }

    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        operation_name: &str,
        url: Url,
        resource: Resource<'_>,
    ) -> Result<T> {
        retry_with_backoff(&self.retry, operation_name, || self.get_json(&url, resource)).await
    }
}

/// Ids travel as single path segments. `.` and `..` would be dropped or
/// resolved by URL normalisation, and an empty id addresses the collection.
fn path_id(id: &str) -> Result<&str> {
    match id {
        "" | "." | ".." => Err(BountyError::InvalidId(id.to_string())),
        _ => Ok(id),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, resource: Resource<'_>) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(error_for_status(status, &body, resource));
    }

    Ok(serde_json::from_str(&body)?)
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                trimmed.to_string()
            }
        })
}

fn error_for_status(status: StatusCode, body: &str, resource: Resource<'_>) -> BountyError {
    let message = error_message(status, body);

    match (status, resource) {
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => BountyError::Unauthorized,
        (StatusCode::NOT_FOUND, Resource::User(id)) => BountyError::UserNotFound(id.to_string()),
        (StatusCode::NOT_FOUND, Resource::Event(id))
        | (StatusCode::NOT_FOUND, Resource::Registration { event_id: id, .. }) => {
            BountyError::EventNotFound(id.to_string())
        }
        (StatusCode::CONFLICT, Resource::Registration { event_id, user_id })
            if message.to_lowercase().contains("already") =>
        {
            BountyError::AlreadyRegistered {
                event_id: event_id.to_string(),
                user_id: user_id.to_string(),
            }
        }
        _ => BountyError::Api { status: status.as_u16(), message },
    }
}

#[async_trait]
impl ProfileSource for RestClient {
    async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile> {
        let url = self.endpoint(&["users", path_id(user_id)?])?;
        let profile: UserProfile = self
            .get_with_retry("fetch_profile", url, Resource::User(user_id))
            .await?;
        info!("Fetched profile {} ({} XP)", profile.id, profile.total_xp);
        Ok(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>> {
        let url = self.endpoint(&["users"])?;
        self.get_with_retry("list_profiles", url, Resource::Users).await
    }
}

#[async_trait]
impl EventRegistry for RestClient {
    async fn get_event(&self, event_id: &str) -> Result<Event> {
        let url = self.endpoint(&["events", path_id(event_id)?])?;
        self.get_with_retry("get_event", url, Resource::Event(event_id)).await
    }

    async fn register_for_event(&self, event_id: &str, user_id: &str) -> Result<Event> {
        let url = self.endpoint(&["events", path_id(event_id)?, "register"])?;
        debug!("POST {}", url);

        let request = self.http.post(url).json(&RegisterRequest { user_id });
        let response = self.authorized(request).send().await?;
        let resource = Resource::Registration { event_id, user_id };

        match read_json(response, resource).await {
            Err(BountyError::Api { status: 409, message }) => {
                // Any other conflict means the quota is used up.
                warn!("Registration for {} rejected: {}", event_id, message);
                match self.get_event(event_id).await {
                    Ok(event) => Err(BountyError::EventFull {
                        event_id: event.id,
                        capacity: event.capacity,
                    }),
                    Err(e) => {
                        warn!("Could not read back {} after conflict: {}", event_id, e);
                        Err(BountyError::Api { status: 409, message })
                    }
                }
            }
            other => other,
        }
    }
}
