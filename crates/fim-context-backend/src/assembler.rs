//! Deterministic fill-in-the-middle context assembly.
//!
//! [`ContextAssembler::assemble`] renders a [`CursorContext`] as a text block with a fixed
//! section order:
//!
//! 1. `## Cursor Position`: language, line and column (always present)
//! 2. `## Code Context`: a fenced block with the FIM tokens around prefix and suffix
//! 3. `## Selected Text`: every selection with non-empty text
//! 4. `## Recent Edits`: the newest edits first
//!
//! Sections without data are left out entirely. Sections are separated by one blank line.
//! Edit and selection text is rendered as JSON string literals, which keeps every entry on one
//! line. Nothing time-dependent is rendered, so identical input always produces identical
//! output.
//!
//! ```rust
//! use fim_context::CursorContext;
//! use fim_context_backend::{FIM_MIDDLE, FIM_PREFIX, FIM_SUFFIX, WAITING_SENTINEL, assemble};
//!
//! assert_eq!(assemble(None), WAITING_SENTINEL);
//!
//! let context = CursorContext {
//!     line: 1,
//!     column: 4,
//!     prefix: "def ".to_string(),
//!     suffix: "():".to_string(),
//!     language: "python".to_string(),
//!     selections: Vec::new(),
//!     recent_edits: Vec::new(),
//! };
//! let text = assemble(Some(&context));
//! assert!(text.contains(&format!("{FIM_PREFIX}def {FIM_SUFFIX}():{FIM_MIDDLE}")));
//! assert!(!text.contains("## Recent Edits"));
//! ```

use fim_context::{CursorContext, EditInfo, EditKind, SelectionInfo};
use serde_json::Value;

/// Marks the start of the prefix.
pub const FIM_PREFIX: &str = "<|fim_prefix|>";
/// Marks the start of the suffix.
pub const FIM_SUFFIX: &str = "<|fim_suffix|>";
/// Marks the completion point.
pub const FIM_MIDDLE: &str = "<|fim_middle|>";

/// Returned verbatim when no context has been received yet.
pub const WAITING_SENTINEL: &str = "Waiting for cursor context...";

/// Default number of recent edits rendered.
pub const DEFAULT_MAX_RECENT_EDITS: usize = 5;

const FALLBACK_LANGUAGE: &str = "plaintext";

/// Renders cursor contexts into FIM text blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextAssembler {
    max_recent_edits: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECENT_EDITS)
    }
}

impl ContextAssembler {
    /// Create an assembler rendering at most `max_recent_edits` edits.
    pub fn new(max_recent_edits: usize) -> Self {
        Self { max_recent_edits }
    }

    /// Maximum number of edits rendered.
    pub fn max_recent_edits(&self) -> usize {
        self.max_recent_edits
    }

    /// Render `context`, or the waiting sentinel when absent.
    pub fn assemble(&self, context: Option<&CursorContext>) -> String {
        let Some(context) = context else {
            return WAITING_SENTINEL.to_string();
        };

        let language = if context.language.is_empty() {
            FALLBACK_LANGUAGE
        } else {
            context.language.as_str()
        };

        let mut sections = vec![position_section(context, language)];
        if let Some(section) = code_section(context, language) {
            sections.push(section);
        }
        if let Some(section) = selection_section(&context.selections) {
            sections.push(section);
        }
        if let Some(section) = edits_section(&context.recent_edits, self.max_recent_edits) {
            sections.push(section);
        }

        sections.join("\n\n")
    }
}

/// Render `context` with the default assembler.
pub fn assemble(context: Option<&CursorContext>) -> String {
    ContextAssembler::default().assemble(context)
}

fn position_section(context: &CursorContext, language: &str) -> String {
    format!(
        "## Cursor Position\nLanguage: {language}\nLine: {}\nColumn: {}",
        context.line, context.column
    )
}

fn code_section(context: &CursorContext, language: &str) -> Option<String> {
    if context.prefix.is_empty() && context.suffix.is_empty() {
        return None;
    }
    Some(format!(
        "## Code Context\n```{language}\n{FIM_PREFIX}{}{FIM_SUFFIX}{}{FIM_MIDDLE}\n```",
        context.prefix, context.suffix
    ))
}

fn selection_section(selections: &[SelectionInfo]) -> Option<String> {
    let lines: Vec<String> = selections
        .iter()
        .filter(|s| !s.text.is_empty())
        .map(|sel| {
            format!(
                "- {}:{}-{}:{}: {}",
                sel.from_line,
                sel.from_column,
                sel.to_line,
                sel.to_column,
                quote(&sel.text)
            )
        })
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(format!("## Selected Text\n{}", lines.join("\n")))
}

fn edits_section(edits: &[EditInfo], limit: usize) -> Option<String> {
    let lines: Vec<String> = edits
        .iter()
        .rev()
        .filter(|e| !e.is_noop())
        .take(limit)
        .enumerate()
        .map(|(n, edit)| format!("{}. {}", n + 1, describe_edit(edit)))
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(format!("## Recent Edits (newest first)\n{}", lines.join("\n")))
}

fn describe_edit(edit: &EditInfo) -> String {
    match edit.kind() {
        Some(EditKind::Insertion) => format!("Inserted {} at {}", quote(&edit.insert), edit.from),
        Some(EditKind::Deletion) => format!(
            "Deleted {} at {}..{}",
            quote(&edit.remove),
            edit.from,
            edit.to
        ),
        Some(EditKind::Replacement) | None => format!(
            "Replaced {} with {} at {}..{}",
            quote(&edit.remove),
            quote(&edit.insert),
            edit.from,
            edit.to
        ),
    }
}

/// JSON string literal for `text`.
fn quote(text: &str) -> String {
    Value::from(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context() -> CursorContext {
        CursorContext {
            line: 2,
            column: 0,
            prefix: "ab\n".to_string(),
            suffix: "cd".to_string(),
            language: "python".to_string(),
            selections: Vec::new(),
            recent_edits: Vec::new(),
        }
    }

    #[test]
    fn test_waiting_sentinel() {
        assert_eq!(assemble(None), WAITING_SENTINEL);
    }

    #[test]
    fn test_minimal_layout() {
        assert_eq!(
            assemble(Some(&context())),
            "## Cursor Position\nLanguage: python\nLine: 2\nColumn: 0\n\n\
             ## Code Context\n```python\n<|fim_prefix|>ab\n<|fim_suffix|>cd<|fim_middle|>\n```"
        );
    }

    #[test]
    fn test_empty_window_omits_code_section() {
        let mut ctx = context();
        ctx.prefix.clear();
        ctx.suffix.clear();
        ctx.language.clear();
        assert_eq!(
            assemble(Some(&ctx)),
            "## Cursor Position\nLanguage: plaintext\nLine: 2\nColumn: 0"
        );
    }

    #[test]
    fn test_caret_only_selections_omit_section() {
        let mut ctx = context();
        ctx.selections.push(SelectionInfo {
            from: 3,
            to: 3,
            from_line: 2,
            from_column: 0,
            to_line: 2,
            to_column: 0,
            text: String::new(),
        });
        assert!(!assemble(Some(&ctx)).contains("## Selected Text"));
    }

    #[test]
    fn test_edit_descriptions() {
        assert_eq!(
            describe_edit(&EditInfo::new(0, 4, 4, "", "a\n")),
            r#"Inserted "a\n" at 4"#
        );
        assert_eq!(
            describe_edit(&EditInfo::new(0, 1, 3, "xy", "")),
            r#"Deleted "xy" at 1..3"#
        );
        assert_eq!(
            describe_edit(&EditInfo::new(0, 2, 5, "xyz", "Q")),
            r#"Replaced "xyz" with "Q" at 2..5"#
        );
    }

    #[test]
    fn test_edit_limit_newest_first() {
        let mut ctx = context();
        for i in 0..8 {
            ctx.recent_edits
                .push(EditInfo::new(i, i as usize, i as usize, "", i.to_string()));
        }
        let assembler = ContextAssembler::new(3);
        let text = assembler.assemble(Some(&ctx));
        assert!(text.ends_with(
            "## Recent Edits (newest first)\n\
             1. Inserted \"7\" at 7\n\
             2. Inserted \"6\" at 6\n\
             3. Inserted \"5\" at 5"
        ));
    }

    #[test]
    fn test_zero_limit_omits_edits_section() {
        let mut ctx = context();
        ctx.recent_edits.push(EditInfo::new(0, 0, 0, "", "x"));
        let text = ContextAssembler::new(0).assemble(Some(&ctx));
        assert!(!text.contains("Recent Edits"));
    }
}
