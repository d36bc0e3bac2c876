//! Retry logic.
//!
//! # Responsibilities
//! - Run a fallible async operation up to a fixed number of attempts
//! - Pause a fixed delay between failed attempts
//! - Abandon the remaining attempts when shutdown is signalled mid-pause
//!
//! # Design Decisions
//! - No backoff growth or jitter; the delay is constant
//! - The outcome keeps the last error so callers decide how to degrade

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Result of a retry loop.
#[derive(Debug)]
pub enum RetryOutcome<T, E> {
    /// An attempt succeeded.
    Succeeded { value: T, attempts: u32 },
    /// Every attempt failed.
    Exhausted { last_error: E, attempts: u32 },
    /// Shutdown fired while waiting between attempts.
    Interrupted { last_error: E, attempts: u32 },
}

/// Fixed-delay retry loop.
#[derive(Debug, Clone, Copy)]
pub struct FixedRetry {
    max_attempts: u32,
    delay: Duration,
}

impl FixedRetry {
    /// `max_attempts` is clamped to at least one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `op` until it succeeds, attempts run out, or `shutdown` interrupts a pause.
    ///
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut>(
        &self,
        operation: &'static str,
        shutdown: &Shutdown,
        mut op: F,
    ) -> RetryOutcome<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            metrics::record_attempt(operation);

            let error = match op(attempt).await {
                Ok(value) => return RetryOutcome::Succeeded { value, attempts: attempt },
                Err(e) => e,
            };

            tracing::warn!(
                operation,
                attempt,
                max_attempts = self.max_attempts,
                error = %error,
                "Attempt failed"
            );

            if attempt >= self.max_attempts {
                return RetryOutcome::Exhausted { last_error: error, attempts: attempt };
            }

            tokio::select! {
                _ = tokio::time::sleep(self.delay) => {}
                _ = shutdown.notified() => {
                    tracing::info!(operation, attempt, "Retry pause interrupted by shutdown");
                    return RetryOutcome::Interrupted { last_error: error, attempts: attempt };
                }
            }
        }
    }
}
