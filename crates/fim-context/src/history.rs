//! Bounded, time-windowed log of recent edits.
//!
//! The history is owned by a single tracker and never shared. Every [`EditHistory::record`]
//! applies two eviction rules, in order:
//!
//! 1. keep at most [`HistoryLimits::capacity`] entries (oldest dropped first);
//! 2. drop entries older than [`HistoryLimits::max_age_ms`] relative to the edit just recorded.
//!
//! Overflow is the designed behavior and is never reported to callers.

use crate::edit::EditInfo;
use std::collections::VecDeque;

/// Default maximum number of retained edits.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;
/// Default maximum age of a retained edit (ms), relative to the newest edit.
pub const DEFAULT_HISTORY_MAX_AGE_MS: u64 = 30_000;

/// Eviction limits for [`EditHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    /// Maximum number of entries.
    pub capacity: usize,
    /// Maximum age in milliseconds.
    pub max_age_ms: u64,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            max_age_ms: DEFAULT_HISTORY_MAX_AGE_MS,
        }
    }
}

/// Ordered (oldest-first) log of normalized edits.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    entries: VecDeque<EditInfo>,
    limits: HistoryLimits,
}

impl EditHistory {
    /// Create an empty history with default limits.
    pub fn new() -> Self {
        Self::with_limits(HistoryLimits::default())
    }

    /// Create an empty history with the given limits.
    pub fn with_limits(limits: HistoryLimits) -> Self {
        Self {
            entries: VecDeque::with_capacity(limits.capacity.saturating_add(1)),
            limits,
        }
    }

    /// Eviction limits in effect.
    pub fn limits(&self) -> HistoryLimits {
        self.limits
    }

    /// Append one edit and evict per the history limits.
    ///
    /// No-op edits are ignored.
    pub fn record(&mut self, edit: EditInfo) {
        if edit.is_noop() {
            return;
        }

        let newest = edit.timestamp;
        self.entries.push_back(edit);

        let before = self.entries.len();
        while self.entries.len() > self.limits.capacity {
            self.entries.pop_front();
        }

        let cutoff = newest.saturating_sub(self.limits.max_age_ms);
        self.entries.retain(|e| e.timestamp >= cutoff);

        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::trace!(evicted, retained = self.entries.len(), "edit history evicted");
        }
    }

    /// Owned copy of the retained edits, oldest first.
    pub fn snapshot(&self) -> Vec<EditInfo> {
        self.entries.iter().cloned().collect()
    }

    /// Number of retained edits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no edits are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all retained edits.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_at(ts: u64, offset: usize) -> EditInfo {
        EditInfo::new(ts, offset, offset, "", "x")
    }

    #[test]
    fn test_empty_history_snapshot() {
        let history = EditHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.snapshot(), Vec::<EditInfo>::new());
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let mut history = EditHistory::new();
        for i in 0..5 {
            history.record(insert_at(i * 10, i as usize));
        }
        let froms: Vec<usize> = history.snapshot().iter().map(|e| e.from).collect();
        assert_eq!(froms, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_capacity_keeps_most_recent() {
        let mut history = EditHistory::new();
        for i in 0..25u64 {
            history.record(insert_at(i, i as usize));
        }
        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), 20);
        assert_eq!(snapshot.first().map(|e| e.from), Some(5));
        assert_eq!(snapshot.last().map(|e| e.from), Some(24));
    }

    #[test]
    fn test_age_eviction_relative_to_new_edit() {
        let mut history = EditHistory::new();
        history.record(insert_at(0, 0));
        history.record(insert_at(10_000, 1));
        history.record(insert_at(30_000, 2));
        // Exactly 30s old: still retained.
        assert_eq!(history.len(), 3);

        history.record(insert_at(30_001, 3));
        let froms: Vec<usize> = history.snapshot().iter().map(|e| e.from).collect();
        assert_eq!(froms, vec![1, 2, 3]);

        history.record(insert_at(100_000, 4));
        assert_eq!(history.snapshot().len(), 1);
    }

    #[test]
    fn test_noop_edits_are_not_recorded() {
        let mut history = EditHistory::new();
        history.record(EditInfo::new(0, 4, 4, "", ""));
        assert!(history.is_empty());
    }

    #[test]
    fn test_snapshot_is_detached_from_storage() {
        let mut history = EditHistory::new();
        history.record(insert_at(0, 0));
        let mut snapshot = history.snapshot();
        snapshot.clear();
        history.record(insert_at(1, 1));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_custom_limits() {
        let mut history = EditHistory::with_limits(HistoryLimits {
            capacity: 2,
            max_age_ms: 5,
        });
        history.record(insert_at(0, 0));
        history.record(insert_at(1, 1));
        history.record(insert_at(2, 2));
        assert_eq!(history.len(), 2);
        history.record(insert_at(10, 3));
        assert_eq!(history.len(), 1);
    }
}
