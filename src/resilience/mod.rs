//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Lookup against the user service:
//!     → policy.rs (which failure strategy applies)
//!     → retries.rs (fixed-delay retry loop, only for the `retry` policy)
//!     → shutdown signal interrupts the pause between attempts
//! ```
//!
//! # Design Decisions
//! - Fixed delay only: no exponential growth, no jitter
//! - Every failure counts toward the attempt bound
//! - No pause after the final attempt

pub mod policy;
pub mod retries;

pub use policy::FailurePolicy;
pub use retries::{FixedRetry, RetryOutcome};
