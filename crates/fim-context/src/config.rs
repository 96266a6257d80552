//! Tracker configuration.
//!
//! Every field has a default, so a partial JSON document only overrides what it names:
//!
//! ```rust
//! use fim_context::TrackerConfig;
//!
//! let config = TrackerConfig::from_json_str(r#"{ "quiet_interval_ms": 0 }"#).unwrap();
//! assert_eq!(config.quiet_interval_ms, 0);
//! assert_eq!(config.prefix_chars, 1000);
//! ```

use crate::emitter::DEFAULT_QUIET_INTERVAL_MS;
use crate::error::ConfigError;
use crate::history::{DEFAULT_HISTORY_CAPACITY, DEFAULT_HISTORY_MAX_AGE_MS, HistoryLimits};
use crate::window::{DEFAULT_PREFIX_CHARS, DEFAULT_SUFFIX_CHARS, WindowLimits};
use serde::Deserialize;

/// Options controlling how contexts are published over the synchronization channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Transport-level debounce for `cursor_context`.
    pub context_debounce_ms: Option<u64>,
    /// Transport-level debounce for `selected_language`.
    pub language_debounce_ms: Option<u64>,
    /// Transport-level debounce for `code_content`.
    pub content_debounce_ms: Option<u64>,
    /// Deliver context updates even when unchanged from the last delivered value.
    pub event_priority: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            context_debounce_ms: Some(100),
            language_debounce_ms: Some(0),
            content_debounce_ms: None,
            event_priority: false,
        }
    }
}

/// Configuration for a [`crate::ContextTracker`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Maximum prefix length (characters).
    pub prefix_chars: usize,
    /// Maximum suffix length (characters).
    pub suffix_chars: usize,
    /// Maximum number of edits kept in history.
    pub history_capacity: usize,
    /// Maximum edit age (ms) relative to the newest edit.
    pub history_max_age_ms: u64,
    /// Emitter quiet interval (ms). Zero delivers on the next poll.
    pub quiet_interval_ms: u64,
    /// Channel publishing options.
    pub channel: ChannelConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            prefix_chars: DEFAULT_PREFIX_CHARS,
            suffix_chars: DEFAULT_SUFFIX_CHARS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_max_age_ms: DEFAULT_HISTORY_MAX_AGE_MS,
            quiet_interval_ms: DEFAULT_QUIET_INTERVAL_MS,
            channel: ChannelConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value domains.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// History eviction limits.
    pub fn history_limits(&self) -> HistoryLimits {
        HistoryLimits {
            capacity: self.history_capacity,
            max_age_ms: self.history_max_age_ms,
        }
    }

    /// Context window sizes.
    pub fn window_limits(&self) -> WindowLimits {
        WindowLimits {
            prefix_chars: self.prefix_chars,
            suffix_chars: self.suffix_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.window_limits(), WindowLimits::default());
        assert_eq!(config.history_limits(), HistoryLimits::default());
        assert_eq!(config.quiet_interval_ms, 200);
        assert_eq!(config.channel.context_debounce_ms, Some(100));
    }

    #[test]
    fn test_partial_override() {
        let config = TrackerConfig::from_json_str(
            r#"{ "suffix_chars": 50, "channel": { "event_priority": true } }"#,
        )
        .unwrap();
        assert_eq!(config.suffix_chars, 50);
        assert_eq!(config.prefix_chars, 1000);
        assert!(config.channel.event_priority);
        assert_eq!(config.channel.language_debounce_ms, Some(0));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            TrackerConfig::from_json_str(r#"{ "history_capacity": 0 }"#),
            Err(ConfigError::Invalid {
                field: "history_capacity",
                ..
            })
        ));
        assert!(matches!(
            TrackerConfig::from_json_str(r#"{ "prefix_chars": -1 }"#),
            Err(ConfigError::Json(_))
        ));
    }
}
