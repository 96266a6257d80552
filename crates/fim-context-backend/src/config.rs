//! Session configuration.

use crate::assembler::DEFAULT_MAX_RECENT_EDITS;
use fim_context::ConfigError;
use serde::Deserialize;

/// Configuration for a [`crate::ContextSession`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of recent edits rendered into `cursor_info`.
    pub max_recent_edits: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_recent_edits: DEFAULT_MAX_RECENT_EDITS,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON configuration. Unknown fields are ignored.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_override() {
        assert_eq!(SessionConfig::from_json_str("{}").unwrap().max_recent_edits, 5);
        assert_eq!(
            SessionConfig::from_json_str(r#"{ "max_recent_edits": 2 }"#)
                .unwrap()
                .max_recent_edits,
            2
        );
        assert!(SessionConfig::from_json_str("[]").is_err());
    }
}
