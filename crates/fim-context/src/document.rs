//! Headless editing surface.
//!
//! [`Document`] is the live document/cursor/selection model the context tracker observes. It
//! keeps:
//!
//! - **Text**: a rope-backed [`LineIndex`]
//! - **Selections**: an ordered set of [`SelectionRange`]s with a primary index, reported in
//!   the order the host set them
//! - **Version Tracking**: a version number bumped on every observable change
//! - **Change Notifications**: subscribers receive a [`SurfaceEvent`] after each change
//!
//! Document changes are described by [`ChangeSpec`]s in **pre-change** coordinates. Applying
//! them produces a [`DocumentChange`] that carries both text generations, so observers can
//! slice removed text from the document as it was before the change.
//!
//! # Example
//!
//! ```rust
//! use fim_context::{ChangeSpec, Document};
//!
//! let mut doc = Document::new("hello world", "text");
//! doc.subscribe(|event| println!("surface event: {:?}", event));
//!
//! let change = doc
//!     .apply_changes(vec![ChangeSpec::replace(6..11, "there")])
//!     .unwrap()
//!     .expect("not a no-op");
//! assert_eq!(change.before.text(), "hello world");
//! assert_eq!(doc.text(), "hello there");
//! ```

use crate::error::DocumentError;
use crate::line_index::LineIndex;
use std::ops::Range;
use std::sync::Arc;

/// One selection range. `anchor == head` is a pure cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// Fixed end of the selection (character offset).
    pub anchor: usize,
    /// Moving end of the selection; the caret sits here (character offset).
    pub head: usize,
}

impl SelectionRange {
    /// Create a selection from `anchor` to `head`.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create an empty selection (caret) at `offset`.
    pub fn cursor(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Lower bound of the selected range.
    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Upper bound of the selected range.
    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// A single replaced range of a change, in pre-change character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSpec {
    /// Start offset (inclusive).
    pub from: usize,
    /// End offset (exclusive).
    pub to: usize,
    /// Replacement text.
    pub insert: String,
}

impl ChangeSpec {
    /// Insert `text` at `offset`.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            from: offset,
            to: offset,
            insert: text.into(),
        }
    }

    /// Delete `range`.
    pub fn delete(range: Range<usize>) -> Self {
        Self {
            from: range.start,
            to: range.end,
            insert: String::new(),
        }
    }

    /// Replace `range` with `text`.
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            from: range.start,
            to: range.end,
            insert: text.into(),
        }
    }

    fn is_noop(&self) -> bool {
        self.from == self.to && self.insert.is_empty()
    }
}

/// A document change, carrying both text generations.
#[derive(Debug, Clone)]
pub struct DocumentChange {
    /// Document text before the change.
    pub before: LineIndex,
    /// Document text after the change.
    pub after: LineIndex,
    /// Disjoint, ascending sub-ranges in `before` coordinates.
    pub changes: Vec<ChangeSpec>,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
}

/// Notification delivered to surface subscribers.
#[derive(Debug, Clone)]
pub enum SurfaceEvent {
    /// Document text changed (selections were mapped through the change).
    DocumentChanged(Arc<DocumentChange>),
    /// Selection set changed without a text change.
    SelectionChanged {
        /// Version before the change.
        old_version: u64,
        /// Version after the change.
        new_version: u64,
    },
    /// Active content mode changed.
    LanguageChanged {
        /// New language identifier.
        language: String,
    },
}

/// Surface change callback function type
pub type SurfaceCallback = Box<dyn FnMut(&SurfaceEvent) + Send>;

/// Live document/selection model.
pub struct Document {
    index: LineIndex,
    language: String,
    selections: Vec<SelectionRange>,
    primary: usize,
    version: u64,
    callbacks: Vec<SurfaceCallback>,
}

impl Document {
    /// Create a document with a caret at offset 0.
    pub fn new(text: &str, language: impl Into<String>) -> Self {
        Self {
            index: LineIndex::from_text(text),
            language: language.into(),
            selections: vec![SelectionRange::cursor(0)],
            primary: 0,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Create an empty document.
    pub fn empty(language: impl Into<String>) -> Self {
        Self::new("", language)
    }

    /// Current text index.
    pub fn index(&self) -> &LineIndex {
        &self.index
    }

    /// Current text.
    pub fn text(&self) -> String {
        self.index.text()
    }

    /// Length in characters.
    pub fn char_count(&self) -> usize {
        self.index.char_count()
    }

    /// Active language identifier.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// All selection ranges, in host order.
    pub fn selections(&self) -> &[SelectionRange] {
        &self.selections
    }

    /// Index of the primary selection in [`Document::selections`].
    pub fn primary_index(&self) -> usize {
        self.primary
    }

    /// The primary selection.
    pub fn primary(&self) -> SelectionRange {
        self.selections[self.primary]
    }

    /// Caret offset of the primary selection.
    pub fn cursor_offset(&self) -> usize {
        self.primary().head
    }

    /// Current version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Subscribe to surface change notifications
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&SurfaceEvent) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Apply a (possibly multi-range) change.
    ///
    /// Sub-ranges must be disjoint and ascending, expressed in pre-change offsets. Selections are
    /// mapped through the change; a caret at an insertion point ends up after the inserted
    /// text. Returns `Ok(None)` without bumping the version when every sub-range is a no-op.
    pub fn apply_changes(
        &mut self,
        changes: Vec<ChangeSpec>,
    ) -> Result<Option<Arc<DocumentChange>>, DocumentError> {
        let len = self.index.char_count();
        let mut previous_end = 0;
        for change in &changes {
            if change.from > change.to {
                return Err(DocumentError::InvertedRange {
                    from: change.from,
                    to: change.to,
                });
            }
            if change.to > len {
                return Err(DocumentError::RangeOutOfBounds {
                    from: change.from,
                    to: change.to,
                    len,
                });
            }
            if change.from < previous_end {
                return Err(DocumentError::UnorderedChanges {
                    previous_end,
                    from: change.from,
                });
            }
            previous_end = change.to;
        }

        let changes: Vec<ChangeSpec> = changes.into_iter().filter(|c| !c.is_noop()).collect();
        if changes.is_empty() {
            return Ok(None);
        }

        let before = self.index.clone();
        let mut after = before.clone();
        // Back to front so earlier offsets stay valid.
        for change in changes.iter().rev() {
            after.delete(change.from..change.to);
            after.insert(change.from, &change.insert);
        }

        for selection in &mut self.selections {
            selection.anchor = map_offset(selection.anchor, &changes);
            selection.head = map_offset(selection.head, &changes);
        }

        let old_version = self.version;
        self.version += 1;
        self.index = after.clone();

        let change = Arc::new(DocumentChange {
            before,
            after,
            changes,
            old_version,
            new_version: self.version,
        });
        self.notify_callbacks(&SurfaceEvent::DocumentChanged(change.clone()));
        Ok(Some(change))
    }

    /// Insert `text` at `offset`.
    pub fn insert(
        &mut self,
        offset: usize,
        text: &str,
    ) -> Result<Option<Arc<DocumentChange>>, DocumentError> {
        self.apply_changes(vec![ChangeSpec::insert(offset, text)])
    }

    /// Delete `range`.
    pub fn delete(
        &mut self,
        range: Range<usize>,
    ) -> Result<Option<Arc<DocumentChange>>, DocumentError> {
        self.apply_changes(vec![ChangeSpec::delete(range)])
    }

    /// Replace `range` with `text`.
    pub fn replace(
        &mut self,
        range: Range<usize>,
        text: &str,
    ) -> Result<Option<Arc<DocumentChange>>, DocumentError> {
        self.apply_changes(vec![ChangeSpec::replace(range, text)])
    }

    /// Replace the selection set.
    ///
    /// Returns `Ok(false)` (and notifies nobody) when the set is unchanged.
    pub fn set_selections(
        &mut self,
        selections: Vec<SelectionRange>,
        primary: usize,
    ) -> Result<bool, DocumentError> {
        if selections.is_empty() {
            return Err(DocumentError::EmptySelectionSet);
        }
        if primary >= selections.len() {
            return Err(DocumentError::PrimaryOutOfRange {
                index: primary,
                count: selections.len(),
            });
        }
        let len = self.index.char_count();
        if let Some(bad) = selections.iter().map(|s| s.to()).find(|&offset| offset > len) {
            return Err(DocumentError::SelectionOutOfBounds { offset: bad, len });
        }

        if selections == self.selections && primary == self.primary {
            return Ok(false);
        }

        self.selections = selections;
        self.primary = primary;

        let old_version = self.version;
        self.version += 1;
        self.notify_callbacks(&SurfaceEvent::SelectionChanged {
            old_version,
            new_version: self.version,
        });
        Ok(true)
    }

    /// Collapse the selection set to a single caret at `offset`.
    pub fn set_cursor(&mut self, offset: usize) -> Result<bool, DocumentError> {
        self.set_selections(vec![SelectionRange::cursor(offset)], 0)
    }

    /// Switch the active content mode.
    pub fn set_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        if language == self.language {
            return;
        }
        self.language = language.clone();
        self.notify_callbacks(&SurfaceEvent::LanguageChanged { language });
    }

    fn notify_callbacks(&mut self, event: &SurfaceEvent) {
        for callback in &mut self.callbacks {
            callback(event);
        }
    }
}

/// Map a pre-change offset to its post-change position.
fn map_offset(pos: usize, changes: &[ChangeSpec]) -> usize {
    let mut added = 0usize;
    let mut removed = 0usize;

    for (i, change) in changes.iter().enumerate() {
        if pos < change.from {
            break;
        }
        let inserted = change.insert.chars().count();
        if pos == change.from && change.from < change.to {
            return change.from - removed + added;
        }
        // A caret at the end of this range may also sit where the next range starts.
        let touches_next = pos == change.to && changes.get(i + 1).is_some_and(|n| n.from == pos);
        if pos <= change.to && !touches_next {
            return change.from - removed + added + inserted;
        }
        added += inserted;
        removed += change.to - change.from;
    }

    pos - removed + added
}
