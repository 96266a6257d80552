//! Error types.

use fim_context::WireError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while handling session input.
pub enum SessionError {
    #[error("unknown input key `{0}`")]
    /// The key is not one of the session inputs.
    UnknownKey(String),

    #[error("invalid payload for `{key}`: expected {expected}")]
    /// The value has the wrong JSON type for its key.
    InvalidPayload {
        /// Input key.
        key: &'static str,
        /// Expected JSON shape.
        expected: &'static str,
    },

    #[error("invalid cursor context: {0}")]
    /// A `cursor_context` payload failed to decode or validate.
    Wire(#[from] WireError),

    #[error("malformed message: {0}")]
    /// A frame has an unusable header or its body is not a `{ "key", "value" }` object.
    Message(String),

    #[error("I/O error: {0}")]
    /// Reading or writing a framed message failed.
    Io(#[from] std::io::Error),
}
