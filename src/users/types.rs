//! User record and lookup error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User identifier as the user service knows it. Not validated.
pub type UserId = i64;

/// Name substituted when a lookup fails irrecoverably.
pub const FALLBACK_NAME: &str = "Unknown User";

/// Body of `GET /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
}

/// Reasons a lookup can fail. Every policy treats them alike.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Connection refused, DNS failure, or any other transport problem.
    #[error("User service unreachable: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("User service timed out: {0}")]
    Timeout(String),

    /// Non-2xx response.
    #[error("User service returned status {0}")]
    Status(u16),

    /// 2xx response with nothing in it.
    #[error("User service returned an empty body")]
    EmptyBody,

    /// Body was not a user record.
    #[error("Malformed user record: {0}")]
    Decode(String),

    /// Record decoded but carried a blank name.
    #[error("User {0} has an empty name")]
    EmptyName(UserId),
}

/// Result type for lookups.
pub type LookupResult<T> = Result<T, LookupError>;

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            LookupError::Status(status.as_u16())
        } else if e.is_decode() {
            LookupError::Decode(e.to_string())
        } else {
            LookupError::Transport(e.to_string())
        }
    }
}

impl UserRecord {
    /// Parse a response body, rejecting empty bodies and blank names.
    pub fn from_body(id: UserId, body: &[u8]) -> LookupResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(LookupError::EmptyBody);
        }
        let record: UserRecord =
            serde_json::from_slice(body).map_err(|e| LookupError::Decode(e.to_string()))?;
        if record.name.trim().is_empty() {
            return Err(LookupError::EmptyName(id));
        }
        Ok(record)
    }
}
