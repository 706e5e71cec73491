//! In-memory transparency log.
//!
//! Tracks what the agent sampled and sent during this run. Nothing here is
//! written to disk; the statistics end with the process.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Collection and delivery statistics for the current run.
#[derive(Debug)]
pub struct TransparencyLog {
    /// Sampling ticks executed
    ticks: AtomicU64,
    /// Ticks that produced a counted title
    samples: AtomicU64,
    /// Ticks with no focused window or an empty title
    empty_ticks: AtomicU64,
    /// Reports handed to the transport
    reports_sent: AtomicU64,
    /// Reports acknowledged with a success marker
    reports_accepted: AtomicU64,
    /// Responses without a success marker
    response_warnings: AtomicU64,
    /// Cycles that ended in an error
    cycle_failures: AtomicU64,
    /// Batches discarded after a failed delivery
    batches_dropped: AtomicU64,
    /// Run start time
    session_start: DateTime<Utc>,
}

impl TransparencyLog {
    pub fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
            samples: AtomicU64::new(0),
            empty_ticks: AtomicU64::new(0),
            reports_sent: AtomicU64::new(0),
            reports_accepted: AtomicU64::new(0),
            response_warnings: AtomicU64::new(0),
            cycle_failures: AtomicU64::new(0),
            batches_dropped: AtomicU64::new(0),
            session_start: Utc::now(),
        }
    }

    /// Record one tick; `counted` tells whether it produced a sample.
    pub fn record_tick(&self, counted: bool) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        if counted {
            self.samples.fetch_add(1, Ordering::Relaxed);
        } else {
            self.empty_ticks.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_report_sent(&self) {
        self.reports_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_report_accepted(&self) {
        self.reports_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_response_warning(&self) {
        self.response_warnings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cycle_failure(&self) {
        self.cycle_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_batch_dropped(&self) {
        self.batches_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> TransparencyStats {
        TransparencyStats {
            ticks: self.ticks.load(Ordering::Relaxed),
            samples: self.samples.load(Ordering::Relaxed),
            empty_ticks: self.empty_ticks.load(Ordering::Relaxed),
            reports_sent: self.reports_sent.load(Ordering::Relaxed),
            reports_accepted: self.reports_accepted.load(Ordering::Relaxed),
            response_warnings: self.response_warnings.load(Ordering::Relaxed),
            cycle_failures: self.cycle_failures.load(Ordering::Relaxed),
            batches_dropped: self.batches_dropped.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Ticks sampled: {}\n\
             - Titles counted: {}\n\
             - Ticks without a focused window: {}\n\
             - Reports sent: {}\n\
             - Reports acknowledged: {}\n\
             - Unexpected responses: {}\n\
             - Failed cycles: {}\n\
             - Batches dropped: {}\n\
             - Session started: {}\n\
             - Session duration: {} seconds\n\
             \n\
             Collected data:\n\
             - Only the trailing segment of the focused window title\n\
             - Only per-title tick counts leave this machine",
            stats.ticks,
            stats.samples,
            stats.empty_ticks,
            stats.reports_sent,
            stats.reports_accepted,
            stats.response_warnings,
            stats.cycle_failures,
            stats.batches_dropped,
            stats.session_start.format("%Y-%m-%d %H:%M:%S UTC"),
            stats.session_duration_secs
        )
    }
}

impl Default for TransparencyLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of transparency statistics.
#[derive(Debug, Clone)]
pub struct TransparencyStats {
    pub ticks: u64,
    pub samples: u64,
    pub empty_ticks: u64,
    pub reports_sent: u64,
    pub reports_accepted: u64,
    pub response_warnings: u64,
    pub cycle_failures: u64,
    pub batches_dropped: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Thread-safe shared transparency log.
pub type SharedTransparencyLog = Arc<TransparencyLog>;

/// Create a new shared transparency log.
pub fn create_shared_log() -> SharedTransparencyLog {
    Arc::new(TransparencyLog::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counting() {
        let log = TransparencyLog::new();

        log.record_tick(true);
        log.record_tick(true);
        log.record_tick(false);

        let stats = log.stats();
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.samples, 2);
        assert_eq!(stats.empty_ticks, 1);
    }

    #[test]
    fn test_delivery_counting() {
        let log = create_shared_log();

        log.record_report_sent();
        log.record_report_sent();
        log.record_report_accepted();
        log.record_response_warning();
        log.record_cycle_failure();
        log.record_batch_dropped();

        let stats = log.stats();
        assert_eq!(stats.reports_sent, 2);
        assert_eq!(stats.reports_accepted, 1);
        assert_eq!(stats.response_warnings, 1);
        assert_eq!(stats.cycle_failures, 1);
        assert_eq!(stats.batches_dropped, 1);
    }

    #[test]
    fn test_summary_format() {
        let log = TransparencyLog::new();
        let summary = log.summary();

        assert!(summary.contains("Ticks sampled: 0"));
        assert!(summary.contains("Reports sent: 0"));
        assert!(summary.contains("Collected data"));
        assert!(summary.contains(&format!(
            "Session started: {}",
            log.stats().session_start.format("%Y-%m-%d %H:%M:%S UTC")
        )));
    }
}
