//! Debounced delivery of cursor contexts.
//!
//! [`DebouncedEmitter`] is a single-slot scheduler. Every [`notify`](DebouncedEmitter::notify)
//! replaces whatever was pending, so bursts of notifications collapse into one delivery built
//! from the last one. The host drives time by calling [`poll`](DebouncedEmitter::poll) from its
//! event loop:
//!
//! ```text
//! Idle ──notify──▶ Pending(deadline) ──poll ≥ deadline──▶ deliver ──▶ Idle
//!                    │   ▲
//!                    └───┘ notify (previous context discarded)
//! ```
//!
//! A quiet interval of zero delivers on the next poll.

use crate::context::CursorContext;

/// Default quiet interval (ms).
pub const DEFAULT_QUIET_INTERVAL_MS: u64 = 200;

/// Delivery callback function type
pub type ContextSink = Box<dyn FnMut(CursorContext) + Send>;

/// Scheduler state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitterState {
    /// Nothing scheduled.
    Idle,
    /// One context waiting for its deadline.
    Pending {
        /// Time (ms) at which the context becomes deliverable.
        deadline: u64,
        /// The context to deliver.
        context: CursorContext,
    },
}

/// Coalesces bursts of notifications into one delivery per quiet period.
pub struct DebouncedEmitter {
    quiet_interval_ms: u64,
    state: EmitterState,
    sink: Option<ContextSink>,
    delivered: u64,
}

impl DebouncedEmitter {
    /// Create an emitter with no consumer registered.
    pub fn new(quiet_interval_ms: u64) -> Self {
        Self {
            quiet_interval_ms,
            state: EmitterState::Idle,
            sink: None,
            delivered: 0,
        }
    }

    /// Register the consumer. Replaces any previous consumer.
    pub fn set_sink<F>(&mut self, sink: F)
    where
        F: FnMut(CursorContext) + Send + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    /// Remove the consumer and drop any pending context.
    pub fn clear_sink(&mut self) {
        self.sink = None;
        self.state = EmitterState::Idle;
    }

    /// Returns `true` if a consumer is registered.
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Quiet interval in milliseconds.
    pub fn quiet_interval_ms(&self) -> u64 {
        self.quiet_interval_ms
    }

    /// Change the quiet interval. Applies to the next notification.
    pub fn set_quiet_interval_ms(&mut self, quiet_interval_ms: u64) {
        self.quiet_interval_ms = quiet_interval_ms;
    }

    /// Current scheduler state.
    pub fn state(&self) -> &EmitterState {
        &self.state
    }

    /// Returns `true` if a context is waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, EmitterState::Pending { .. })
    }

    /// Deadline of the pending context, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        match &self.state {
            EmitterState::Pending { deadline, .. } => Some(*deadline),
            EmitterState::Idle => None,
        }
    }

    /// Number of contexts delivered so far.
    pub fn delivered_count(&self) -> u64 {
        self.delivered
    }

    /// Schedule `context` for delivery after the quiet interval, replacing any pending one.
    ///
    /// Does nothing while no consumer is registered.
    pub fn notify(&mut self, now_ms: u64, context: CursorContext) {
        if self.sink.is_none() {
            tracing::trace!("no context consumer registered; notification ignored");
            return;
        }

        let deadline = now_ms.saturating_add(self.quiet_interval_ms);
        if let EmitterState::Pending {
            deadline: previous, ..
        } = &self.state
        {
            tracing::trace!(previous, deadline, "pending context superseded");
        }
        self.state = EmitterState::Pending { deadline, context };
    }

    /// Deliver the pending context if its deadline has passed.
    ///
    /// Returns `true` if a context was delivered.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let due = matches!(&self.state, EmitterState::Pending { deadline, .. } if now_ms >= *deadline);
        if !due {
            return false;
        }

        let EmitterState::Pending { context, .. } =
            std::mem::replace(&mut self.state, EmitterState::Idle)
        else {
            return false;
        };

        let Some(sink) = self.sink.as_mut() else {
            return false;
        };

        tracing::debug!(
            line = context.line,
            column = context.column,
            recent_edits = context.recent_edits.len(),
            "delivering cursor context"
        );
        self.delivered += 1;
        sink(context);
        true
    }

    /// Drop the pending context without delivering it.
    ///
    /// Returns `true` if something was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = EmitterState::Idle;
        was_pending
    }
}
