//! Transparency module for the focus telemetry agent.
//!
//! Keeps a running account of what the agent sampled and what it sent, so
//! the user can see it at shutdown.

pub mod log;

// Re-export commonly used types
pub use log::{create_shared_log, SharedTransparencyLog, TransparencyLog, TransparencyStats};
