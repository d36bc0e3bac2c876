//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the post service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::resilience::FailurePolicy;

/// Root configuration for the post service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the user service lives.
    pub user_service: UserServiceConfig,

    /// How author name lookups behave on failure.
    pub lookup: LookupConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8082").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8082".to_string(),
        }
    }
}

/// Upstream user service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UserServiceConfig {
    /// Base URL; `/users/{id}` is appended. A trailing slash is ignored.
    pub base_url: String,

    /// Optional per-request timeout in seconds. `None` keeps the client default (no timeout).
    pub timeout_secs: Option<u64>,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://userservice:8081".to_string(),
            timeout_secs: None,
        }
    }
}

/// Lookup failure handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Strategy applied when a lookup fails.
    pub policy: FailurePolicy,

    /// Name returned by the `fallback` and `retry` policies.
    pub fallback_name: String,

    /// Total attempts made by the `retry` policy.
    pub max_attempts: u32,

    /// Fixed pause between attempts in milliseconds.
    pub delay_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            policy: FailurePolicy::Retry,
            fallback_name: crate::users::FALLBACK_NAME.to_string(),
            max_attempts: 3,
            delay_ms: 500,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Off unless set; when set it must outlast the worst-case listing.
    pub request_secs: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.user_service.base_url, "http://userservice:8081");
        assert_eq!(config.lookup.policy, FailurePolicy::Retry);
        assert_eq!(config.lookup.max_attempts, 3);
        assert_eq!(config.lookup.delay_ms, 500);
        assert_eq!(config.lookup.fallback_name, "Unknown User");
        assert!(config.user_service.timeout_secs.is_none());
        assert!(config.timeouts.request_secs.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let raw = r#"
            [user_service]
            base_url = "http://localhost:8080/"

            [lookup]
            policy = "propagate"
        "#;
        let config: ServiceConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.user_service.base_url, "http://localhost:8080/");
        assert_eq!(config.lookup.policy, FailurePolicy::Propagate);
        assert_eq!(config.lookup.max_attempts, 3);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8082");
    }
}
