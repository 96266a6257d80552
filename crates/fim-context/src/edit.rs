//! Normalized edit records.
//!
//! An [`EditInfo`] describes a single replaced range of a document, expressed in **character
//! offsets** (Unicode scalar values) of the document *before* the edit was applied. A single
//! host change that touches several disjoint ranges (multi-cursor typing, for example) is
//! recorded as one `EditInfo` per range, all sharing one capture timestamp.

use serde::{Deserialize, Serialize};

/// A single document mutation.
///
/// Semantics:
/// - `[from, to)` is a half-open character range in the pre-edit document.
/// - `remove` is the exact text that occupied that range before the edit.
/// - `insert` is the exact text written into the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditInfo {
    /// Monotonic capture time in milliseconds.
    pub timestamp: u64,
    /// Start character offset (inclusive) in the pre-edit document.
    pub from: usize,
    /// End character offset (exclusive) in the pre-edit document.
    pub to: usize,
    /// Removed text (empty for a pure insertion).
    pub remove: String,
    /// Inserted text (empty for a pure deletion).
    pub insert: String,
}

/// How an edit changed the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Text was inserted without removing anything.
    Insertion,
    /// Text was removed without inserting anything.
    Deletion,
    /// Text was removed and other text written in its place.
    Replacement,
}

impl EditInfo {
    /// Create an edit record.
    pub fn new(
        timestamp: u64,
        from: usize,
        to: usize,
        remove: impl Into<String>,
        insert: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            from,
            to,
            remove: remove.into(),
            insert: insert.into(),
        }
    }

    /// Returns `true` if the edit neither removes nor inserts text.
    pub fn is_noop(&self) -> bool {
        self.remove.is_empty() && self.insert.is_empty()
    }

    /// Classify the edit. Returns `None` for a no-op.
    pub fn kind(&self) -> Option<EditKind> {
        match (self.remove.is_empty(), self.insert.is_empty()) {
            (true, false) => Some(EditKind::Insertion),
            (false, true) => Some(EditKind::Deletion),
            (false, false) => Some(EditKind::Replacement),
            (true, true) => None,
        }
    }

    /// Length of `remove` in characters.
    pub fn removed_len(&self) -> usize {
        self.remove.chars().count()
    }

    /// Length of `insert` in characters.
    pub fn inserted_len(&self) -> usize {
        self.insert.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            EditInfo::new(0, 3, 3, "", "x").kind(),
            Some(EditKind::Insertion)
        );
        assert_eq!(
            EditInfo::new(0, 3, 5, "ab", "").kind(),
            Some(EditKind::Deletion)
        );
        assert_eq!(
            EditInfo::new(0, 2, 5, "xyz", "Q").kind(),
            Some(EditKind::Replacement)
        );
        assert!(EditInfo::new(0, 1, 1, "", "").is_noop());
        assert_eq!(EditInfo::new(0, 1, 1, "", "").kind(), None);
    }

    #[test]
    fn test_wire_field_names() {
        let edit = EditInfo::new(42, 2, 5, "xyz", "Q");
        let value = serde_json::to_value(&edit).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "timestamp": 42,
                "from": 2,
                "to": 5,
                "remove": "xyz",
                "insert": "Q",
            })
        );
    }

    #[test]
    fn test_lengths_count_chars() {
        let edit = EditInfo::new(0, 0, 2, "é😀", "ab c");
        assert_eq!(edit.removed_len(), 2);
        assert_eq!(edit.inserted_len(), 4);
    }
}
