//! Error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced when applying changes or selections to a [`crate::Document`].
pub enum DocumentError {
    #[error("range {from}..{to} is out of bounds (document length {len})")]
    /// A change range extends past the end of the document.
    RangeOutOfBounds {
        /// Start character offset.
        from: usize,
        /// End character offset.
        to: usize,
        /// Document length in characters.
        len: usize,
    },

    #[error("inverted range {from}..{to}")]
    /// A change range has `from > to`.
    InvertedRange {
        /// Start character offset.
        from: usize,
        /// End character offset.
        to: usize,
    },

    #[error("change at {from} overlaps or precedes the previous change ending at {previous_end}")]
    /// Sub-ranges of one change are not disjoint and ascending.
    UnorderedChanges {
        /// End offset of the previous sub-range.
        previous_end: usize,
        /// Start offset of the offending sub-range.
        from: usize,
    },

    #[error("selection offset {offset} is out of bounds (document length {len})")]
    /// A selection endpoint lies past the end of the document.
    SelectionOutOfBounds {
        /// Offending offset.
        offset: usize,
        /// Document length in characters.
        len: usize,
    },

    #[error("selection set is empty")]
    /// At least one selection range is required.
    EmptySelectionSet,

    #[error("primary selection index {index} is out of range ({count} selections)")]
    /// The primary index does not address a selection.
    PrimaryOutOfRange {
        /// Requested primary index.
        index: usize,
        /// Number of selections.
        count: usize,
    },
}

#[derive(Debug, Error)]
/// Errors produced while loading configuration.
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    /// The configuration is not valid JSON for the expected shape.
    Json(#[from] serde_json::Error),

    #[error("invalid configuration value for `{field}`: {reason}")]
    /// A field has a value outside its valid domain.
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
/// Errors produced while decoding a [`crate::CursorContext`] received over the wire.
pub enum WireError {
    #[error("JSON decode error: {0}")]
    /// The payload does not match the wire schema.
    Json(#[from] serde_json::Error),

    #[error("edit range {from}..{to} is inverted")]
    /// An edit has `from > to`.
    InvalidEditRange {
        /// Start offset.
        from: usize,
        /// End offset.
        to: usize,
    },

    #[error("selection range {from}..{to} is inverted or its endpoints disagree")]
    /// A selection has `from > to` or its line/column endpoints are out of order.
    InvalidSelectionRange {
        /// Start offset.
        from: usize,
        /// End offset.
        to: usize,
    },

    #[error("line numbers are 1-based, got {0}")]
    /// A line number of zero was received.
    InvalidLine(usize),
}
