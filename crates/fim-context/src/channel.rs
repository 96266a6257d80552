//! Synchronization channel seam.
//!
//! The key/value transport between the editing surface and the backend session is an external
//! collaborator. This module names the keys both sides agree on and the one primitive the
//! tracker needs from the transport: "set value for key, with optional debounce and optional
//! dedup bypass".

use crate::config::ChannelConfig;
use crate::context::CursorContext;
use crate::error::WireError;
use serde_json::Value;

/// Channel keys.
pub mod keys {
    /// Raw document text (input).
    pub const CODE_CONTENT: &str = "code_content";
    /// Active language identifier (input).
    pub const SELECTED_LANGUAGE: &str = "selected_language";
    /// Full [`crate::CursorContext`] payload (input).
    pub const CURSOR_CONTEXT: &str = "cursor_context";

    /// Line count of the document (output).
    pub const LINE_COUNT: &str = "line_count";
    /// Word count of the document (output).
    pub const WORD_COUNT: &str = "word_count";
    /// Character count of the document (output).
    pub const CHAR_COUNT: &str = "char_count";
    /// Assembled FIM text (output).
    pub const CURSOR_INFO: &str = "cursor_info";

    /// Echo of the caret position (output).
    pub const CURSOR_POSITION: &str = "cursor_position";
    /// Echo of the selections (output).
    pub const CURRENT_SELECTIONS: &str = "current_selections";
    /// Echo of the prefix (output).
    pub const CONTEXT_PREFIX: &str = "context_prefix";
    /// Echo of the suffix (output).
    pub const CONTEXT_SUFFIX: &str = "context_suffix";
    /// Echo of the recent edits (output).
    pub const RECENT_EDITS_SERVER: &str = "recent_edits_server";
}

/// Per-update transport options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetOptions {
    /// Transport-level debounce; `None` uses the transport default.
    pub debounce_ms: Option<u64>,
    /// Deliver even if the value equals the last delivered one.
    pub event_priority: bool,
}

/// The inbound half of a synchronization channel.
pub trait SyncChannel {
    /// Set the value for `key`.
    fn set_value(&mut self, key: &str, value: Value, options: SetOptions);
}

/// Publish a cursor context under [`keys::CURSOR_CONTEXT`].
pub fn publish_context<C>(
    channel: &mut C,
    context: &CursorContext,
    config: &ChannelConfig,
) -> Result<(), WireError>
where
    C: SyncChannel + ?Sized,
{
    let value = context.to_value()?;
    channel.set_value(
        keys::CURSOR_CONTEXT,
        value,
        SetOptions {
            debounce_ms: config.context_debounce_ms,
            event_priority: config.event_priority,
        },
    );
    Ok(())
}

/// Publish the raw document text under [`keys::CODE_CONTENT`].
pub fn publish_content<C>(channel: &mut C, text: &str, config: &ChannelConfig)
where
    C: SyncChannel + ?Sized,
{
    channel.set_value(
        keys::CODE_CONTENT,
        Value::String(text.to_string()),
        SetOptions {
            debounce_ms: config.content_debounce_ms,
            event_priority: false,
        },
    );
}

/// Publish the active language under [`keys::SELECTED_LANGUAGE`].
pub fn publish_language<C>(channel: &mut C, language: &str, config: &ChannelConfig)
where
    C: SyncChannel + ?Sized,
{
    channel.set_value(
        keys::SELECTED_LANGUAGE,
        Value::String(language.to_string()),
        SetOptions {
            debounce_ms: config.language_debounce_ms,
            event_priority: false,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorded(Vec<(String, Value, SetOptions)>);

    impl SyncChannel for Recorded {
        fn set_value(&mut self, key: &str, value: Value, options: SetOptions) {
            self.0.push((key.to_string(), value, options));
        }
    }

    #[test]
    fn test_publish_uses_configured_options() {
        let config = ChannelConfig::default();
        let mut channel = Recorded::default();

        publish_language(&mut channel, "rust", &config);
        publish_content(&mut channel, "fn main() {}", &config);

        assert_eq!(channel.0[0].0, keys::SELECTED_LANGUAGE);
        assert_eq!(channel.0[0].2.debounce_ms, Some(0));
        assert_eq!(channel.0[1].0, keys::CODE_CONTENT);
        assert_eq!(channel.0[1].1, Value::String("fn main() {}".to_string()));
        assert_eq!(channel.0[1].2.debounce_ms, None);
    }

    #[test]
    fn test_publish_context() {
        let config = ChannelConfig {
            event_priority: true,
            ..ChannelConfig::default()
        };
        let context = CursorContext {
            line: 1,
            column: 2,
            prefix: "ab".to_string(),
            suffix: String::new(),
            language: "text".to_string(),
            selections: Vec::new(),
            recent_edits: Vec::new(),
        };
        let mut channel = Recorded::default();
        publish_context(&mut channel, &context, &config).unwrap();

        let (key, value, options) = &channel.0[0];
        assert_eq!(key, keys::CURSOR_CONTEXT);
        assert_eq!(value["prefix"], "ab");
        assert_eq!(
            *options,
            SetOptions {
                debounce_ms: Some(100),
                event_priority: true
            }
        );
    }
}
