//! Author name lookup with a configurable failure policy.
//!
//! # Responsibilities
//! - Resolve a user id to a display name via a [`UserDirectory`]
//! - Apply the configured [`FailurePolicy`] when the directory fails
//! - Log every failure and count every outcome
//!
//! # Policy Outcomes
//! ```text
//! return_none → Ok(None)
//! fallback    → Ok(Some(fallback_name))
//! propagate   → Err(LookupError)
//! retry       → up to max_attempts, fixed pause, then Ok(Some(fallback_name))
//! ```
//! A successful fetch yields `Ok(Some(name))` under every policy.

use std::sync::Arc;
use std::time::Duration;

use crate::config::LookupConfig;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::resilience::{FailurePolicy, FixedRetry, RetryOutcome};
use crate::users::client::UserDirectory;
use crate::users::types::{LookupResult, UserId};

/// Looks up display names, degrading according to the configured policy.
#[derive(Clone)]
pub struct UserNameLookup {
    directory: Arc<dyn UserDirectory>,
    policy: FailurePolicy,
    fallback_name: String,
    retry: FixedRetry,
    shutdown: Shutdown,
}

impl UserNameLookup {
    /// `shutdown` interrupts the pause between retry attempts.
    pub fn new(directory: Arc<dyn UserDirectory>, config: &LookupConfig, shutdown: Shutdown) -> Self {
        Self {
            directory,
            policy: config.policy,
            fallback_name: config.fallback_name.clone(),
            retry: FixedRetry::new(config.max_attempts, Duration::from_millis(config.delay_ms)),
            shutdown,
        }
    }

    /// Resolve `id` to a display name.
    ///
    /// Only the `propagate` policy ever returns `Err`; only `return_none` ever returns `Ok(None)`.
    pub async fn user_name(&self, id: UserId) -> LookupResult<Option<String>> {
        let policy = self.policy.as_str();

        match self.policy {
            FailurePolicy::Retry => Ok(Some(self.user_name_with_retry(id).await)),
            FailurePolicy::ReturnNone => match self.fetch_once(id).await {
                Ok(name) => Ok(Some(name)),
                Err(error) => {
                    tracing::error!(user_id = id, error = %error, "User lookup failed");
                    metrics::record_lookup(policy, "none");
                    Ok(None)
                }
            },
            FailurePolicy::Fallback => match self.fetch_once(id).await {
                Ok(name) => Ok(Some(name)),
                Err(error) => {
                    tracing::warn!(user_id = id, error = %error, "User lookup failed, returning fallback name");
                    metrics::record_lookup(policy, "fallback");
                    Ok(Some(self.fallback_name.clone()))
                }
            },
            FailurePolicy::Propagate => match self.fetch_once(id).await {
                Ok(name) => Ok(Some(name)),
                Err(error) => {
                    tracing::error!(user_id = id, error = %error, "User lookup failed, propagating");
                    metrics::record_lookup(policy, "error");
                    Err(error)
                }
            },
        }
    }

    /// Single attempt; successes are counted here, failures by the caller.
    async fn fetch_once(&self, id: UserId) -> LookupResult<String> {
        let record = self.directory.fetch_user(id).await?;
        metrics::record_lookup(self.policy.as_str(), "success");
        Ok(record.name)
    }

    async fn user_name_with_retry(&self, id: UserId) -> String {
        let policy = self.policy.as_str();
        let outcome = self
            .retry
            .run("user_lookup", &self.shutdown, |_| self.directory.fetch_user(id))
            .await;

        match outcome {
            RetryOutcome::Succeeded { value, attempts } => {
                if attempts > 1 {
                    tracing::info!(user_id = id, attempts, "User lookup succeeded after retry");
                }
                metrics::record_lookup(policy, "success");
                value.name
            }
            RetryOutcome::Exhausted { last_error, attempts } => {
                tracing::error!(
                    user_id = id,
                    attempts,
                    error = %last_error,
                    "User lookup retries exhausted, returning fallback name"
                );
                metrics::record_lookup(policy, "fallback");
                self.fallback_name.clone()
            }
            RetryOutcome::Interrupted { last_error, attempts } => {
                tracing::error!(
                    user_id = id,
                    attempts,
                    error = %last_error,
                    "User lookup retries interrupted, returning fallback name"
                );
                metrics::record_lookup(policy, "interrupted");
                self.fallback_name.clone()
            }
        }
    }
}
