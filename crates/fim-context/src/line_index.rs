//! Rope-backed document text with line/column conversion.
//!
//! Provides O(log N) offset ↔ position conversion and character slicing. Cloning a
//! [`LineIndex`] is cheap (the rope shares its nodes), which lets a change keep the
//! pre-change generation of the document around without copying text.

use ropey::Rope;
use std::ops::Range;

/// Document text indexed by line - implemented using Rope data structure
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get the full text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get total line count (an empty document has one line)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the text in a character range.
    ///
    /// Both bounds are clamped to the document, so out-of-range requests yield a shorter
    /// (possibly empty) string instead of panicking.
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.rope.len_chars();
        let end = range.end.min(len);
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Get zero-based line index and column from character offset
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);

        (line_idx, char_offset - line_start_char)
    }

    /// Get character offset from zero-based line and column
    pub fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let line_start_char = self.rope.line_to_char(line);
        let line_len = if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1) - line_start_char - 1 // -1 for newline
        } else {
            self.rope.len_chars() - line_start_char
        };

        line_start_char + column.min(line_len)
    }

    /// Insert text at a character offset
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete a character range
    pub fn delete(&mut self, range: Range<usize>) {
        let len = self.rope.len_chars();
        let end = range.end.min(len);
        let start = range.start.min(end);

        if start < end {
            self.rope.remove(start..end);
        }
    }
}
