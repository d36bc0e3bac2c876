//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Interrupt retry pauses → Stop accepting → Drain → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - One shared `Shutdown` handle; the HTTP server and every lookup observe it
//! - In-flight retry pauses are cut short rather than delaying shutdown

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
