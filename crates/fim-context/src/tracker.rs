//! Edit/cursor context tracking.
//!
//! [`ContextTracker`] observes a [`Document`]: document changes are normalized into its
//! [`EditHistory`], and every document or selection change schedules a fresh
//! [`CursorContext`] on its [`DebouncedEmitter`]. [`TrackedEditor`] bundles a document with a
//! tracker so that every mutation goes through the observer.
//!
//! # Example
//!
//! ```rust
//! use fim_context::{ManualClock, TrackedEditor, TrackerConfig};
//! use std::sync::{Arc, Mutex};
//!
//! let clock = ManualClock::new(0);
//! let mut editor = TrackedEditor::with_clock("", "rust", TrackerConfig::default(), clock.clone());
//!
//! let delivered = Arc::new(Mutex::new(Vec::new()));
//! let delivered_cb = delivered.clone();
//! editor.on_context(move |context| delivered_cb.lock().unwrap().push(context));
//!
//! editor.insert(0, "fn").unwrap();
//! clock.advance(50);
//! editor.insert(2, " main").unwrap();
//!
//! clock.advance(200);
//! assert!(editor.poll());
//!
//! let delivered = delivered.lock().unwrap();
//! assert_eq!(delivered.len(), 1);
//! assert_eq!(delivered[0].prefix, "fn main");
//! assert_eq!(delivered[0].recent_edits.len(), 2);
//! ```

use crate::clock::{Clock, MonotonicClock};
use crate::config::TrackerConfig;
use crate::context::CursorContext;
use crate::cursor::snapshot_cursor;
use crate::document::{ChangeSpec, Document, DocumentChange, SelectionRange, SurfaceEvent};
use crate::emitter::DebouncedEmitter;
use crate::error::DocumentError;
use crate::history::EditHistory;
use crate::normalize::record_change;
use crate::window::extract_window;
use std::ops::Range;

/// Observer turning surface changes into debounced cursor contexts.
pub struct ContextTracker<C: Clock = MonotonicClock> {
    config: TrackerConfig,
    history: EditHistory,
    emitter: DebouncedEmitter,
    clock: C,
}

impl ContextTracker<MonotonicClock> {
    /// Create a tracker using the monotonic system clock.
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> ContextTracker<C> {
    /// Create a tracker reading time from `clock`.
    pub fn with_clock(config: TrackerConfig, clock: C) -> Self {
        Self {
            history: EditHistory::with_limits(config.history_limits()),
            emitter: DebouncedEmitter::new(config.quiet_interval_ms),
            config,
            clock,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The clock used for timestamps and deadlines.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Recorded edit history.
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// The debounced emitter.
    pub fn emitter(&self) -> &DebouncedEmitter {
        &self.emitter
    }

    /// Register the context consumer. Until one is registered, nothing is scheduled.
    pub fn on_context<F>(&mut self, sink: F)
    where
        F: FnMut(CursorContext) + Send + 'static,
    {
        self.emitter.set_sink(sink);
    }

    /// React to a surface notification for `document`.
    pub fn observe(&mut self, document: &Document, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::DocumentChanged(change) => self.on_document_change(document, change),
            SurfaceEvent::SelectionChanged { .. } => self.on_selection_change(document),
            SurfaceEvent::LanguageChanged { .. } => {}
        }
    }

    /// Record `change` into the history and schedule a context.
    pub fn on_document_change(&mut self, document: &Document, change: &DocumentChange) {
        let now = self.clock.now_ms();
        let recorded = record_change(&mut self.history, change, now);
        tracing::trace!(
            recorded,
            version = change.new_version,
            "document change observed"
        );
        self.schedule(document, now);
    }

    /// Schedule a context after a selection-only change.
    pub fn on_selection_change(&mut self, document: &Document) {
        let now = self.clock.now_ms();
        self.schedule(document, now);
    }

    /// Assemble a context from the current document, selection and history state.
    pub fn build_context(&self, document: &Document) -> CursorContext {
        let cursor = snapshot_cursor(document);
        let window = extract_window(document.index(), cursor.offset, self.config.window_limits());

        CursorContext {
            line: cursor.line,
            column: cursor.column,
            prefix: window.prefix,
            suffix: window.suffix,
            language: document.language().to_string(),
            selections: cursor.selections,
            recent_edits: self.history.snapshot(),
        }
    }

    /// Deliver the pending context if its quiet interval has elapsed.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.emitter.poll(now)
    }

    /// Time (ms) at which the pending context becomes deliverable.
    pub fn next_deadline(&self) -> Option<u64> {
        self.emitter.next_deadline()
    }

    /// Drop the pending context without delivering it.
    pub fn cancel_pending(&mut self) -> bool {
        self.emitter.cancel()
    }

    fn schedule(&mut self, document: &Document, now: u64) {
        if !self.emitter.has_sink() {
            return;
        }
        let context = self.build_context(document);
        self.emitter.notify(now, context);
    }
}

/// A [`Document`] whose every change is observed by a [`ContextTracker`].
pub struct TrackedEditor<C: Clock = MonotonicClock> {
    document: Document,
    tracker: ContextTracker<C>,
}

impl TrackedEditor<MonotonicClock> {
    /// Create an editor using the monotonic system clock.
    pub fn new(text: &str, language: impl Into<String>, config: TrackerConfig) -> Self {
        Self::with_clock(text, language, config, MonotonicClock::new())
    }
}

impl<C: Clock> TrackedEditor<C> {
    /// Create an editor reading time from `clock`.
    pub fn with_clock(
        text: &str,
        language: impl Into<String>,
        config: TrackerConfig,
        clock: C,
    ) -> Self {
        Self {
            document: Document::new(text, language),
            tracker: ContextTracker::with_clock(config, clock),
        }
    }

    /// The observed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The tracker.
    pub fn tracker(&self) -> &ContextTracker<C> {
        &self.tracker
    }

    /// Mutable access to the tracker.
    pub fn tracker_mut(&mut self) -> &mut ContextTracker<C> {
        &mut self.tracker
    }

    /// Subscribe to the document's surface notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&SurfaceEvent) + Send + 'static,
    {
        self.document.subscribe(callback);
    }

    /// Register the context consumer.
    pub fn on_context<F>(&mut self, sink: F)
    where
        F: FnMut(CursorContext) + Send + 'static,
    {
        self.tracker.on_context(sink);
    }

    /// Apply a (possibly multi-range) change. Returns `Ok(false)` for a no-op.
    pub fn apply_changes(&mut self, changes: Vec<ChangeSpec>) -> Result<bool, DocumentError> {
        match self.document.apply_changes(changes)? {
            Some(change) => {
                self.tracker.on_document_change(&self.document, &change);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Insert `text` at `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<bool, DocumentError> {
        self.apply_changes(vec![ChangeSpec::insert(offset, text)])
    }

    /// Delete `range`.
    pub fn delete(&mut self, range: Range<usize>) -> Result<bool, DocumentError> {
        self.apply_changes(vec![ChangeSpec::delete(range)])
    }

    /// Replace `range` with `text`.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<bool, DocumentError> {
        self.apply_changes(vec![ChangeSpec::replace(range, text)])
    }

    /// Replace the selection set. Returns `Ok(false)` when unchanged.
    pub fn set_selections(
        &mut self,
        selections: Vec<SelectionRange>,
        primary: usize,
    ) -> Result<bool, DocumentError> {
        let changed = self.document.set_selections(selections, primary)?;
        if changed {
            self.tracker.on_selection_change(&self.document);
        }
        Ok(changed)
    }

    /// Collapse the selection set to a caret at `offset`.
    pub fn set_cursor(&mut self, offset: usize) -> Result<bool, DocumentError> {
        self.set_selections(vec![SelectionRange::cursor(offset)], 0)
    }

    /// Switch the active content mode. Does not schedule a context.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.document.set_language(language);
    }

    /// Context for the current state, built immediately.
    pub fn context(&self) -> CursorContext {
        self.tracker.build_context(&self.document)
    }

    /// Deliver the pending context if its quiet interval has elapsed.
    pub fn poll(&mut self) -> bool {
        self.tracker.poll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::edit::EditInfo;
    use std::sync::{Arc, Mutex};

    type Delivered = Arc<Mutex<Vec<CursorContext>>>;

    fn editor(text: &str, quiet_ms: u64) -> (TrackedEditor<ManualClock>, ManualClock, Delivered) {
        let clock = ManualClock::new(1_000);
        let config = TrackerConfig {
            quiet_interval_ms: quiet_ms,
            ..TrackerConfig::default()
        };
        let mut editor = TrackedEditor::with_clock(text, "python", config, clock.clone());
        let delivered: Delivered = Arc::new(Mutex::new(Vec::new()));
        let delivered_cb = delivered.clone();
        editor.on_context(move |context| delivered_cb.lock().unwrap().push(context));
        (editor, clock, delivered)
    }

    #[test]
    fn test_context_from_selection_change() {
        let (mut editor, clock, delivered) = editor("ab\ncd", 200);
        editor.set_cursor(3).unwrap();
        clock.advance(200);
        assert!(editor.poll());

        let delivered = delivered.lock().unwrap();
        let context = &delivered[0];
        assert_eq!((context.line, context.column), (2, 0));
        assert_eq!(context.prefix, "ab\n");
        assert_eq!(context.suffix, "cd");
        assert_eq!(context.language, "python");
        assert!(context.recent_edits.is_empty());
    }

    #[test]
    fn test_edits_recorded_with_clock_timestamp() {
        let (mut editor, clock, _) = editor("abxyzcd", 200);
        clock.set(5_000);
        editor.replace(2..5, "Q").unwrap();
        assert_eq!(
            editor.tracker().history().snapshot(),
            vec![EditInfo::new(5_000, 2, 5, "xyz", "Q")]
        );
    }

    #[test]
    fn test_history_recorded_without_consumer() {
        let clock = ManualClock::new(0);
        let mut editor =
            TrackedEditor::with_clock("", "text", TrackerConfig::default(), clock.clone());
        editor.insert(0, "x").unwrap();
        assert_eq!(editor.tracker().history().len(), 1);
        assert!(!editor.tracker().emitter().is_pending());
        clock.advance(1_000);
        assert!(!editor.poll());
    }

    #[test]
    fn test_language_change_does_not_schedule() {
        let (mut editor, _, _) = editor("abc", 200);
        editor.set_language("rust");
        assert!(!editor.tracker().emitter().is_pending());
        assert_eq!(editor.context().language, "rust");
    }

    #[test]
    fn test_noop_change_does_not_schedule() {
        let (mut editor, _, _) = editor("abc", 200);
        assert!(!editor.insert(1, "").unwrap());
        assert!(!editor.set_cursor(0).unwrap());
        assert!(!editor.tracker().emitter().is_pending());
    }

    #[test]
    fn test_observe_dispatches_surface_events() {
        let clock = ManualClock::new(0);
        let mut tracker = ContextTracker::with_clock(TrackerConfig::default(), clock.clone());
        let delivered: Delivered = Arc::new(Mutex::new(Vec::new()));
        let delivered_cb = delivered.clone();
        tracker.on_context(move |context| delivered_cb.lock().unwrap().push(context));

        let mut document = Document::new("hello", "text");
        let change = document.insert(5, "!").unwrap().unwrap();
        tracker.observe(&document, &SurfaceEvent::DocumentChanged(change));
        tracker.observe(
            &document,
            &SurfaceEvent::LanguageChanged {
                language: "text".to_string(),
            },
        );

        assert_eq!(tracker.next_deadline(), Some(200));
        clock.advance(200);
        assert!(tracker.poll());
        assert_eq!(delivered.lock().unwrap()[0].recent_edits.len(), 1);
    }
}
