//! Core functionality for the focus telemetry agent.
//!
//! This module contains:
//! - Title normalization for raw window titles
//! - The per-interval activity counter
//! - Report encoding for dispatch

pub mod counter;
pub mod normalize;
pub mod report;

// Re-export commonly used types
pub use counter::ActivityCounter;
pub use normalize::{last_segment, normalize_title, trim, DEFAULT_DELIMITER};
pub use report::{encode, Report, ReportError};
