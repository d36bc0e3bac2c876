//! Post service library.
//!
//! Serves a fixed post listing whose author names come from a remote user
//! service, with a configurable policy for when that service fails.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod posts;
pub mod resilience;
pub mod users;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use posts::{PostListing, PostRecord};
pub use resilience::FailurePolicy;
pub use users::{HttpUserDirectory, LookupError, UserDirectory, UserNameLookup, UserRecord};
