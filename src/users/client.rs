//! User service HTTP client.
//!
//! # Responsibilities
//! - Build `{base_url}/users/{id}` URLs
//! - Issue one GET per call and decode the user record
//! - Classify failures into [`LookupError`]
//!
//! # Design Decisions
//! - No retries here; the lookup layer owns failure policy
//! - No request timeout unless configured (reqwest default)

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::UserServiceConfig;
use crate::users::types::{LookupError, LookupResult, UserId, UserRecord};

/// Source of user records. The production implementation talks HTTP.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the record for `id`. One attempt, no retries.
    async fn fetch_user(&self, id: UserId) -> LookupResult<UserRecord>;
}

/// [`UserDirectory`] backed by the remote user service.
#[derive(Clone)]
pub struct HttpUserDirectory {
    client: Client,
    base_url: String,
}

impl HttpUserDirectory {
    /// Create a client for the configured user service.
    pub fn new(config: &UserServiceConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self::with_client(builder.build()?, &config.base_url))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the record for `id`.
    pub fn user_url(&self, id: UserId) -> String {
        format!("{}/users/{}", self.base_url, id)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn fetch_user(&self, id: UserId) -> LookupResult<UserRecord> {
        let url = self.user_url(id);
        tracing::debug!(user_id = id, url = %url, "Fetching user");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        UserRecord::from_body(id, &body)
    }
}

impl fmt::Debug for HttpUserDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpUserDirectory")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Strip trailing slashes so `/users/{id}` can be appended verbatim.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
