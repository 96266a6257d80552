#![warn(missing_docs)]
//! FIM Context - Edit/Cursor Context Tracker for Code Completion
//!
//! # Overview
//!
//! `fim-context` watches a live document and turns it into a compact, structured
//! [`CursorContext`] suitable for prompting a fill-in-the-middle completion engine. It does not
//! render anything; the host drives it by applying changes and polling from its event loop.
//!
//! # Core Features
//!
//! - **Edit Normalization**: multi-range changes decomposed into [`EditInfo`] records, with
//!   removed text sliced from the pre-change generation
//! - **Bounded Edit History**: at most 20 edits, none older than 30 s relative to the newest
//! - **Cursor Snapshots**: primary caret line/column plus every selection with its text
//! - **Context Windows**: up to 1000 characters before and 200 after the caret
//! - **Debounced Delivery**: a single-slot scheduler that emits only the last context of a burst
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  TrackedEditor / ContextTracker             │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  DebouncedEmitter (+ Clock)                 │  ← Delivery timing
//! ├─────────────────────────────────────────────┤
//! │  Snapshot + Window + History                │  ← Context assembly
//! ├─────────────────────────────────────────────┤
//! │  Normalizer                                 │  ← Change → EditInfo
//! ├─────────────────────────────────────────────┤
//! │  Document (Rope-based LineIndex)            │  ← Editing surface
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use fim_context::{TrackedEditor, TrackerConfig};
//!
//! let mut editor = TrackedEditor::new("def add(a, b):\n    ", "python", TrackerConfig::default());
//! editor.set_cursor(19).unwrap();
//!
//! let context = editor.context();
//! assert_eq!((context.line, context.column), (2, 4));
//! assert_eq!(context.prefix, "def add(a, b):\n    ");
//! ```
//!
//! # Module Description
//!
//! - [`document`] - Headless editing surface with change notifications
//! - [`line_index`] - Rope based text index
//! - [`normalize`] - Change to [`EditInfo`] conversion
//! - [`history`] - Bounded, time-windowed edit log
//! - [`cursor`] - Cursor and selection snapshots
//! - [`window`] - Prefix/suffix extraction
//! - [`emitter`] - Debounced single-slot delivery
//! - [`tracker`] - Wiring of all of the above
//! - [`channel`] - Synchronization channel keys and publishing helpers
//!
//! # Coordinates
//!
//! Offsets and columns count Unicode scalar values (`char`s). Lines are 1-based in every
//! emitted structure; columns are 0-based.

pub mod channel;
pub mod clock;
pub mod config;
pub mod context;
pub mod cursor;
pub mod document;
pub mod edit;
pub mod emitter;
pub mod error;
pub mod history;
pub mod line_index;
pub mod normalize;
pub mod tracker;
pub mod window;

pub use channel::{SetOptions, SyncChannel, publish_content, publish_context, publish_language};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ChannelConfig, TrackerConfig};
pub use context::CursorContext;
pub use cursor::{CursorSnapshot, SelectionInfo, snapshot_cursor};
pub use document::{
    ChangeSpec, Document, DocumentChange, SelectionRange, SurfaceCallback, SurfaceEvent,
};
pub use edit::{EditInfo, EditKind};
pub use emitter::{ContextSink, DebouncedEmitter, EmitterState};
pub use error::{ConfigError, DocumentError, WireError};
pub use history::{EditHistory, HistoryLimits};
pub use line_index::LineIndex;
pub use normalize::{normalize_change, record_change};
pub use tracker::{ContextTracker, TrackedEditor};
pub use window::{ContextWindow, WindowLimits, extract_window};
