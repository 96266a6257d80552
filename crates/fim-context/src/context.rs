//! The cursor context payload exchanged with the backend session.
//!
//! Wire shape (JSON, camelCase):
//!
//! ```text
//! { line, column, prefix, suffix, language,
//!   selections?: [{from, to, fromLine, fromColumn, toLine, toColumn, text}],
//!   recentEdits?: [{timestamp, from, to, insert, remove}] }
//! ```
//!
//! Missing arrays decode as empty. Decoding through [`CursorContext::from_json`] or
//! [`CursorContext::from_value`] also checks the structural invariants, so read sites can trust
//! the shape.

use crate::cursor::SelectionInfo;
use crate::edit::EditInfo;
use crate::error::WireError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One emitted snapshot of the editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorContext {
    /// 1-based line of the primary caret.
    pub line: usize,
    /// 0-based column of the primary caret.
    pub column: usize,
    /// Text immediately before the caret.
    pub prefix: String,
    /// Text immediately after the caret.
    pub suffix: String,
    /// Active language identifier.
    pub language: String,
    /// Active selections in host order.
    #[serde(default)]
    pub selections: Vec<SelectionInfo>,
    /// Recent edits, oldest first.
    #[serde(default)]
    pub recent_edits: Vec<EditInfo>,
}

impl CursorContext {
    /// Decode and validate a JSON string.
    pub fn from_json(json: &str) -> Result<Self, WireError> {
        let context: Self = serde_json::from_str(json)?;
        context.validate()?;
        Ok(context)
    }

    /// Decode and validate an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, WireError> {
        let context: Self = serde_json::from_value(value)?;
        context.validate()?;
        Ok(context)
    }

    /// Encode as a JSON value.
    pub fn to_value(&self) -> Result<Value, WireError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), WireError> {
        if self.line == 0 {
            return Err(WireError::InvalidLine(self.line));
        }

        for sel in &self.selections {
            let endpoints_ordered =
                (sel.from_line, sel.from_column) <= (sel.to_line, sel.to_column);
            if sel.from > sel.to || sel.from_line == 0 || !endpoints_ordered {
                return Err(WireError::InvalidSelectionRange {
                    from: sel.from,
                    to: sel.to,
                });
            }
        }

        if let Some(edit) = self.recent_edits.iter().find(|e| e.from > e.to) {
            return Err(WireError::InvalidEditRange {
                from: edit.from,
                to: edit.to,
            });
        }

        Ok(())
    }
}
