//! Backend session state.
//!
//! A [`ContextSession`] keeps the latest value of each input key and recomputes the outputs
//! that depend on it. Each inbound value replaces the previous one wholesale: contexts are full
//! snapshots, so a lost or out-of-order delivery is repaired by the next one.

use crate::assembler::ContextAssembler;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::stats::DocumentStats;
use fim_context::CursorContext;
use fim_context::channel::keys;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

/// A decoded session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// Raw document text.
    CodeContent(String),
    /// Active language identifier.
    SelectedLanguage(String),
    /// Latest cursor context; `None` clears it.
    CursorContext(Option<CursorContext>),
}

impl SessionInput {
    /// Decode and validate the value received for `key`.
    pub fn from_key_value(key: &str, value: Value) -> Result<Self, SessionError> {
        match key {
            keys::CODE_CONTENT => match value {
                Value::String(text) => Ok(Self::CodeContent(text)),
                Value::Null => Ok(Self::CodeContent(String::new())),
                _ => Err(SessionError::InvalidPayload {
                    key: keys::CODE_CONTENT,
                    expected: "a string",
                }),
            },
            keys::SELECTED_LANGUAGE => match value {
                Value::String(language) => Ok(Self::SelectedLanguage(language)),
                _ => Err(SessionError::InvalidPayload {
                    key: keys::SELECTED_LANGUAGE,
                    expected: "a string",
                }),
            },
            keys::CURSOR_CONTEXT => match value {
                Value::Null => Ok(Self::CursorContext(None)),
                value => Ok(Self::CursorContext(Some(CursorContext::from_value(value)?))),
            },
            other => Err(SessionError::UnknownKey(other.to_string())),
        }
    }

    /// Channel key this input arrives on.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CodeContent(_) => keys::CODE_CONTENT,
            Self::SelectedLanguage(_) => keys::SELECTED_LANGUAGE,
            Self::CursorContext(_) => keys::CURSOR_CONTEXT,
        }
    }
}

/// A new value for an output key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputUpdate {
    /// Output key.
    pub key: &'static str,
    /// Current value.
    pub value: Value,
}

impl OutputUpdate {
    fn new(key: &'static str, value: Value) -> Self {
        Self { key, value }
    }
}

/// Latest-state backend session.
#[derive(Debug, Clone, Default)]
pub struct ContextSession {
    assembler: ContextAssembler,
    code: String,
    language: String,
    context: Option<CursorContext>,
    stats: DocumentStats,
}

impl ContextSession {
    /// Create an empty session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            assembler: ContextAssembler::new(config.max_recent_edits),
            ..Self::default()
        }
    }

    /// Latest document text.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Latest selected language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Latest cursor context, as received.
    pub fn context(&self) -> Option<&CursorContext> {
        self.context.as_ref()
    }

    /// Statistics of the latest document text.
    pub fn stats(&self) -> DocumentStats {
        self.stats
    }

    /// Assembled FIM text for the latest context.
    pub fn cursor_info(&self) -> String {
        match &self.context {
            Some(context) if context.language.is_empty() && !self.language.is_empty() => {
                let mut context = context.clone();
                context.language.clone_from(&self.language);
                self.assembler.assemble(Some(&context))
            }
            context => self.assembler.assemble(context.as_ref()),
        }
    }

    /// Decode, validate and apply one keyed message.
    ///
    /// Rejected messages leave the session untouched.
    pub fn handle_message(
        &mut self,
        key: &str,
        value: Value,
    ) -> Result<Vec<OutputUpdate>, SessionError> {
        match SessionInput::from_key_value(key, value) {
            Ok(input) => Ok(self.handle(input)),
            Err(err) => {
                warn!(key, error = %err, "rejected session input");
                Err(err)
            }
        }
    }

    /// Apply one input and return the outputs it affects.
    pub fn handle(&mut self, input: SessionInput) -> Vec<OutputUpdate> {
        let key = input.key();
        let updates = match input {
            SessionInput::CodeContent(code) => {
                self.stats = DocumentStats::from_text(&code);
                self.code = code;
                self.stats_outputs()
            }
            SessionInput::SelectedLanguage(language) => {
                self.language = language;
                vec![self.cursor_info_output()]
            }
            SessionInput::CursorContext(context) => {
                self.context = context;
                let mut updates = vec![self.cursor_info_output()];
                updates.extend(self.echo_outputs());
                updates
            }
        };
        debug!(key, outputs = updates.len(), "session updated");
        updates
    }

    /// Every output with its current value.
    pub fn outputs(&self) -> Vec<OutputUpdate> {
        let mut outputs = self.stats_outputs();
        outputs.push(self.cursor_info_output());
        outputs.extend(self.echo_outputs());
        outputs
    }

    fn stats_outputs(&self) -> Vec<OutputUpdate> {
        vec![
            OutputUpdate::new(keys::LINE_COUNT, json!(self.stats.line_count)),
            OutputUpdate::new(keys::WORD_COUNT, json!(self.stats.word_count)),
            OutputUpdate::new(keys::CHAR_COUNT, json!(self.stats.char_count)),
        ]
    }

    fn cursor_info_output(&self) -> OutputUpdate {
        OutputUpdate::new(keys::CURSOR_INFO, Value::String(self.cursor_info()))
    }

    fn echo_outputs(&self) -> Vec<OutputUpdate> {
        let Some(context) = &self.context else {
            return vec![
                OutputUpdate::new(keys::CURSOR_POSITION, Value::Null),
                OutputUpdate::new(keys::CURRENT_SELECTIONS, json!([])),
                OutputUpdate::new(keys::CONTEXT_PREFIX, json!("")),
                OutputUpdate::new(keys::CONTEXT_SUFFIX, json!("")),
                OutputUpdate::new(keys::RECENT_EDITS_SERVER, json!([])),
            ];
        };
        vec![
            OutputUpdate::new(
                keys::CURSOR_POSITION,
                json!({ "line": context.line, "column": context.column }),
            ),
            OutputUpdate::new(keys::CURRENT_SELECTIONS, json!(context.selections)),
            OutputUpdate::new(keys::CONTEXT_PREFIX, json!(context.prefix)),
            OutputUpdate::new(keys::CONTEXT_SUFFIX, json!(context.suffix)),
            OutputUpdate::new(keys::RECENT_EDITS_SERVER, json!(context.recent_edits)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::WAITING_SENTINEL;

    fn value_of<'a>(updates: &'a [OutputUpdate], key: &str) -> Option<&'a Value> {
        updates.iter().find(|u| u.key == key).map(|u| &u.value)
    }

    #[test]
    fn test_fresh_session_outputs() {
        let session = ContextSession::default();
        let outputs = session.outputs();
        assert_eq!(value_of(&outputs, keys::LINE_COUNT), Some(&json!(0)));
        assert_eq!(
            value_of(&outputs, keys::CURSOR_INFO),
            Some(&json!(WAITING_SENTINEL))
        );
        assert_eq!(value_of(&outputs, keys::CURSOR_POSITION), Some(&Value::Null));
    }

    #[test]
    fn test_code_content_updates_counts_only() {
        let mut session = ContextSession::default();
        let updates = session
            .handle_message(keys::CODE_CONTENT, json!("a b\nc"))
            .unwrap();
        let keys_touched: Vec<&str> = updates.iter().map(|u| u.key).collect();
        assert_eq!(
            keys_touched,
            vec![keys::LINE_COUNT, keys::WORD_COUNT, keys::CHAR_COUNT]
        );
        assert_eq!(session.stats().word_count, 3);
    }

    #[test]
    fn test_rejected_input_leaves_state() {
        let mut session = ContextSession::default();
        session
            .handle_message(keys::CODE_CONTENT, json!("keep"))
            .unwrap();
        assert!(matches!(
            session.handle_message(keys::CODE_CONTENT, json!(42)),
            Err(SessionError::InvalidPayload { .. })
        ));
        assert!(matches!(
            session.handle_message("cursor", json!({})),
            Err(SessionError::UnknownKey(_))
        ));
        assert!(matches!(
            session.handle_message(keys::CURSOR_CONTEXT, json!({ "line": 0 })),
            Err(SessionError::Wire(_))
        ));
        assert_eq!(session.code(), "keep");
        assert!(session.context().is_none());
    }

    #[test]
    fn test_empty_context_language_falls_back_to_selected() {
        let mut session = ContextSession::default();
        session
            .handle_message(keys::SELECTED_LANGUAGE, json!("go"))
            .unwrap();
        session
            .handle_message(
                keys::CURSOR_CONTEXT,
                json!({"line":1,"column":0,"prefix":"","suffix":"x","language":""}),
            )
            .unwrap();
        assert!(session.cursor_info().contains("Language: go\n"));
        assert_eq!(session.context().map(|c| c.language.as_str()), Some(""));
    }

    #[test]
    fn test_null_context_clears() {
        let mut session = ContextSession::default();
        session
            .handle_message(
                keys::CURSOR_CONTEXT,
                json!({"line":1,"column":1,"prefix":"a","suffix":"","language":"c"}),
            )
            .unwrap();
        let updates = session
            .handle_message(keys::CURSOR_CONTEXT, Value::Null)
            .unwrap();
        assert_eq!(
            value_of(&updates, keys::CURSOR_INFO),
            Some(&json!(WAITING_SENTINEL))
        );
        assert_eq!(value_of(&updates, keys::CONTEXT_PREFIX), Some(&json!("")));
    }
}
