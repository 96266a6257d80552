#![warn(missing_docs)]
//! `fim-context-backend` - backend session for `fim-context`.
//!
//! This crate contains the receiving side of the synchronization channel: the deterministic
//! fill-in-the-middle context assembler, document statistics, a latest-state session that maps
//! input keys to output keys, and `Content-Length` stdio framing for running the session as a
//! separate process.

pub mod assembler;
pub mod config;
pub mod error;
pub mod session;
pub mod stats;
pub mod transport;

pub use assembler::{
    ContextAssembler, DEFAULT_MAX_RECENT_EDITS, FIM_MIDDLE, FIM_PREFIX, FIM_SUFFIX,
    WAITING_SENTINEL, assemble,
};
pub use config::SessionConfig;
pub use error::SessionError;
pub use session::{ContextSession, OutputUpdate, SessionInput};
pub use stats::DocumentStats;
pub use transport::{Message, read_message, write_message};
