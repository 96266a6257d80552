//! Cursor and selection snapshots.
//!
//! Reads the *current* document and selection state and resolves every active range into a
//! [`SelectionInfo`] (offsets, line/column endpoints and selected text). Lines are 1-based,
//! columns are 0-based character offsets from the start of the line. Ranges are reported in
//! the order the document exposes them; nothing is sorted or merged.

use crate::document::{Document, SelectionRange};
use crate::line_index::LineIndex;
use serde::{Deserialize, Serialize};

/// One active selection or caret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInfo {
    /// Start offset (inclusive).
    pub from: usize,
    /// End offset (exclusive). Equal to `from` for a pure caret.
    pub to: usize,
    /// 1-based line of `from`.
    pub from_line: usize,
    /// 0-based column of `from`.
    pub from_column: usize,
    /// 1-based line of `to`.
    pub to_line: usize,
    /// 0-based column of `to`.
    pub to_column: usize,
    /// Selected text (empty for a pure caret).
    pub text: String,
}

impl SelectionInfo {
    /// Resolve a selection range against `index`.
    pub fn resolve(index: &LineIndex, range: SelectionRange) -> Self {
        let from = range.from();
        let to = range.to();
        let (from_line, from_column) = index.char_offset_to_position(from);
        let (to_line, to_column) = index.char_offset_to_position(to);
        Self {
            from,
            to,
            from_line: from_line + 1,
            from_column,
            to_line: to_line + 1,
            to_column,
            text: index.slice(from..to),
        }
    }

    /// Returns `true` if this is a caret with no selected text.
    pub fn is_caret(&self) -> bool {
        self.from == self.to
    }
}

/// Primary caret position plus every active selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot {
    /// Primary caret offset.
    pub offset: usize,
    /// 1-based line of the primary caret.
    pub line: usize,
    /// 0-based column of the primary caret.
    pub column: usize,
    /// All selections in host order.
    pub selections: Vec<SelectionInfo>,
}

/// Snapshot the caret and selections of `document`.
pub fn snapshot_cursor(document: &Document) -> CursorSnapshot {
    let index = document.index();
    let offset = document.cursor_offset();
    let (line, column) = index.char_offset_to_position(offset);

    let selections = document
        .selections()
        .iter()
        .map(|range| SelectionInfo::resolve(index, *range))
        .collect();

    CursorSnapshot {
        offset,
        line: line + 1,
        column,
        selections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_on_second_line() {
        let mut doc = Document::new("ab\ncd", "text");
        doc.set_cursor(3).unwrap();
        let snapshot = snapshot_cursor(&doc);
        assert_eq!(snapshot.line, 2);
        assert_eq!(snapshot.column, 0);
        assert_eq!(snapshot.offset, 3);
        assert_eq!(snapshot.selections.len(), 1);
        assert!(snapshot.selections[0].is_caret());
        assert_eq!(snapshot.selections[0].text, "");
    }

    #[test]
    fn test_backward_selection_is_normalized_per_range() {
        let mut doc = Document::new("hello\nworld", "text");
        doc.set_selections(vec![SelectionRange::new(8, 2)], 0)
            .unwrap();
        let snapshot = snapshot_cursor(&doc);

        // Caret sits at the head.
        assert_eq!((snapshot.line, snapshot.column), (1, 2));
        let sel = &snapshot.selections[0];
        assert_eq!((sel.from, sel.to), (2, 8));
        assert_eq!((sel.from_line, sel.from_column), (1, 2));
        assert_eq!((sel.to_line, sel.to_column), (2, 2));
        assert_eq!(sel.text, "llo\nwo");
    }

    #[test]
    fn test_host_order_is_preserved() {
        let mut doc = Document::new("abcdef", "text");
        doc.set_selections(
            vec![
                SelectionRange::new(4, 6),
                SelectionRange::new(0, 2),
                SelectionRange::new(0, 2),
            ],
            1,
        )
        .unwrap();
        let snapshot = snapshot_cursor(&doc);
        let texts: Vec<&str> = snapshot.selections.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["ef", "ab", "ab"]);
        assert_eq!(snapshot.offset, 2);
    }

    #[test]
    fn test_wire_field_names() {
        let info = SelectionInfo {
            from: 0,
            to: 2,
            from_line: 1,
            from_column: 0,
            to_line: 1,
            to_column: 2,
            text: "ab".to_string(),
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["fromLine"], 1);
        assert_eq!(value["toColumn"], 2);
        assert_eq!(value["text"], "ab");
    }
}
