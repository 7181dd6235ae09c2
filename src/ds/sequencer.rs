//! Per-prefix monotonic id generator.
//!
//! Each prefix owns an independent counter starting at 1. Counters can be
//! reset one prefix at a time or all at once; after a reset the prefix starts
//! over at 1.

use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Mints `<prefix>_<n>` identifiers with a counter per prefix.
#[derive(Debug, Default)]
pub struct KeySequencer {
    counters: FxHashMap<Arc<str>, u64>,
}

impl KeySequencer {
    /// Creates a sequencer with no counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next sequence number for `prefix`.
    pub fn next(&mut self, prefix: &str) -> u64 {
        match self.counters.get_mut(prefix) {
            Some(counter) => {
                *counter += 1;
                *counter
            },
            None => {
                self.counters.insert(prefix.into(), 1);
                1
            },
        }
    }

    /// Returns the next identifier for `prefix` as `<prefix>_<n>`.
    ///
    /// ```
    /// use contentkit::ds::KeySequencer;
    ///
    /// let mut ids = KeySequencer::new();
    /// assert_eq!(ids.next_id("row"), "row_1");
    /// assert_eq!(ids.next_id("row"), "row_2");
    /// assert_eq!(ids.next_id("cell"), "cell_1");
    /// ```
    pub fn next_id(&mut self, prefix: &str) -> String {
        let n = self.next(prefix);
        format!("{prefix}_{n}")
    }

    /// Last value handed out for `prefix`, if any.
    pub fn current(&self, prefix: &str) -> Option<u64> {
        self.counters.get(prefix).copied()
    }

    /// Restarts the counter for `prefix`. Returns `true` if it existed.
    pub fn reset(&mut self, prefix: &str) -> bool {
        self.counters.remove(prefix).is_some()
    }

    /// Restarts every counter.
    pub fn reset_all(&mut self) {
        self.counters.clear();
    }

    /// Number of prefixes with a live counter.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
