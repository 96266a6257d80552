//! Prefix/suffix extraction around the cursor.

use crate::line_index::LineIndex;

/// Default number of characters captured before the cursor.
pub const DEFAULT_PREFIX_CHARS: usize = 1000;
/// Default number of characters captured after the cursor.
pub const DEFAULT_SUFFIX_CHARS: usize = 200;

/// Window sizes, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLimits {
    /// Maximum prefix length.
    pub prefix_chars: usize,
    /// Maximum suffix length.
    pub suffix_chars: usize,
}

impl Default for WindowLimits {
    fn default() -> Self {
        Self {
            prefix_chars: DEFAULT_PREFIX_CHARS,
            suffix_chars: DEFAULT_SUFFIX_CHARS,
        }
    }
}

/// Text surrounding the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextWindow {
    /// `text[max(0, cursor - prefix_chars), cursor)`
    pub prefix: String,
    /// `text[cursor, min(len, cursor + suffix_chars))`
    pub suffix: String,
}

/// Slice the prefix and suffix around `cursor`.
///
/// Both ends clamp at the document boundaries, including a cursor past the end of the text.
pub fn extract_window(index: &LineIndex, cursor: usize, limits: WindowLimits) -> ContextWindow {
    let len = index.char_count();
    let cursor = cursor.min(len);
    let start = cursor.saturating_sub(limits.prefix_chars);
    let end = cursor.saturating_add(limits.suffix_chars).min(len);

    ContextWindow {
        prefix: index.slice(start..cursor),
        suffix: index.slice(cursor..end),
    }
}
