//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, attempts >= 1)
//! - Keep an inbound request timeout longer than the worst-case listing
//! - Check that addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::config::schema::ServiceConfig;
use crate::resilience::FailurePolicy;

/// Author lookups performed by one `GET /posts`.
const LOOKUPS_PER_LISTING: u64 = 2;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Longest a single listing can spend waiting on the user service.
///
/// `None` when upstream calls have no timeout, i.e. the wait is unbounded.
pub fn worst_case_listing(config: &ServiceConfig) -> Option<Duration> {
    let per_attempt = config.user_service.timeout_secs?.saturating_mul(1000);
    let attempts = match config.lookup.policy {
        FailurePolicy::Retry => u64::from(config.lookup.max_attempts.max(1)),
        _ => 1,
    };
    let pauses = (attempts - 1).saturating_mul(config.lookup.delay_ms);
    let per_lookup = attempts.saturating_mul(per_attempt).saturating_add(pauses);
    Some(Duration::from_millis(per_lookup.saturating_mul(LOOKUPS_PER_LISTING)))
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    match url::Url::parse(&config.user_service.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "user_service.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "user_service.base_url",
            format!("'{}' is not a valid URL: {}", config.user_service.base_url, e),
        )),
    }

    if config.user_service.timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "user_service.timeout_secs",
            "must be greater than zero when set",
        ));
    }

    if config.lookup.max_attempts == 0 {
        errors.push(ValidationError::new("lookup.max_attempts", "must be at least 1"));
    }

    match config.timeouts.request_secs {
        None => {}
        Some(0) => errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero when set",
        )),
        Some(secs) => match worst_case_listing(config) {
            None => errors.push(ValidationError::new(
                "timeouts.request_secs",
                "requires user_service.timeout_secs, otherwise a hung user service outlasts it",
            )),
            Some(worst) if worst >= Duration::from_secs(secs) => errors.push(ValidationError::new(
                "timeouts.request_secs",
                format!(
                    "{}s does not cover the worst-case listing time of {}ms",
                    secs,
                    worst.as_millis()
                ),
            )),
            Some(_) => {}
        },
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
