//! User service integration.
//!
//! # Data Flow
//! ```text
//! user id
//!     → lookup.rs (failure policy, retries)
//!     → client.rs (GET {base_url}/users/{id})
//!     → types.rs (decode UserRecord, classify errors)
//!     → display name / fallback / None / error
//! ```

pub mod client;
pub mod lookup;
pub mod types;

pub use client::{HttpUserDirectory, UserDirectory};
pub use lookup::UserNameLookup;
pub use types::{LookupError, LookupResult, UserId, UserRecord, FALLBACK_NAME};
