//! Conversion of document changes into [`EditInfo`] records.
//!
//! A change may touch several disjoint ranges at once. Each range becomes one record, all
//! sharing the capture timestamp. Removed text is always sliced from
//! [`DocumentChange::before`]; slicing the post-change text would silently record whatever
//! now occupies those offsets.

use crate::document::DocumentChange;
use crate::edit::EditInfo;
use crate::history::EditHistory;

/// Decompose `change` into one [`EditInfo`] per replaced range.
pub fn normalize_change(change: &DocumentChange, timestamp: u64) -> Vec<EditInfo> {
    change
        .changes
        .iter()
        .map(|spec| EditInfo {
            timestamp,
            from: spec.from,
            to: spec.to,
            remove: change.before.slice(spec.from..spec.to),
            insert: spec.insert.clone(),
        })
        .filter(|edit| !edit.is_noop())
        .collect()
}

/// Normalize `change` and record every resulting edit into `history`.
///
/// Returns the number of edits recorded.
pub fn record_change(history: &mut EditHistory, change: &DocumentChange, timestamp: u64) -> usize {
    let edits = normalize_change(change, timestamp);
    let count = edits.len();
    for edit in edits {
        history.record(edit);
    }
    count
}
