//! Document statistics.

use serde::Serialize;

/// Derived counts over raw document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DocumentStats {
    /// Number of `\n`-separated lines; 0 for empty text.
    pub line_count: usize,
    /// Number of whitespace-separated words.
    pub word_count: usize,
    /// Number of characters.
    pub char_count: usize,
}

impl DocumentStats {
    /// Compute statistics for `text`.
    pub fn from_text(text: &str) -> Self {
        let line_count = if text.is_empty() {
            0
        } else {
            text.split('\n').count()
        };
        Self {
            line_count,
            word_count: text.split_whitespace().count(),
            char_count: text.chars().count(),
        }
    }
}
