//! Per-title occurrence counter for one reporting interval.

use std::collections::BTreeMap;

/// Maps a normalized window title to the number of ticks it held focus.
///
/// Keys are kept in an ordered map so reports built from a snapshot are
/// reproducible. The counter has a single writer (the sampling loop) and
/// does no locking of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCounter {
    counts: BTreeMap<String, u64>,
}

impl ActivityCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`. Empty keys are ignored.
    pub fn increment(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        match self.counts.get_mut(key) {
            Some(count) => *count = count.saturating_add(1),
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    /// Current contents, in key order.
    pub fn snapshot(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Drop every entry.
    ///
    /// Only call this once the snapshot for the current report has been
    /// encoded, otherwise the samples of that interval are lost.
    pub fn reset(&mut self) {
        self.counts.clear();
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Number of distinct titles.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of ticks with a valid sample.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, c| acc.saturating_add(*c))
    }
}
