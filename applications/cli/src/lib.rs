//! Podcastr CLI Library
//!
//! Lists an episode feed and runs simulated listening sessions.
//!
//! This library exposes the driver components for testing purposes.

pub mod config;
pub mod session;
pub mod simulated;

// Re-export commonly used types for convenience
pub use config::CliConfig;
pub use session::{Session, SessionEnd, SessionSummary};
pub use simulated::SimulatedBackend;
