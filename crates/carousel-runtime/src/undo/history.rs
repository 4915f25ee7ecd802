#![forbid(unsafe_code)]

//! Snapshot-based edit history with live (uncommitted) updates.
//!
//! [`HistoryState`] keeps `past` snapshots (oldest first), the `present`, and
//! `future` snapshots (nearest redo first). Snapshots are [`Arc`]s, so undo
//! and redo move pointers and never copy documents.
//!
//! # Architecture
//!
//! ```text
//! replace(s3, commit)
//! ┌──────────────────────────────────────────────────┐
//! │ Past:     [Arc(s0), Arc(s1), Arc(s2)]            │
//! │ Present:  Arc(s3)                                │
//! │ Future:   []                                     │
//! └──────────────────────────────────────────────────┘
//!
//! undo() x2
//! ┌──────────────────────────────────────────────────┐
//! │ Past:     [Arc(s0)]                              │
//! │ Present:  Arc(s1)                                │
//! │ Future:   [Arc(s2), Arc(s3)]                     │
//! └──────────────────────────────────────────────────┘
//!
//! replace(s4, live) x n, then settle()
//! ┌──────────────────────────────────────────────────┐
//! │ Past:     [Arc(s0), Arc(s1)]   <- anchor s1      │
//! │ Present:  Arc(s4)                                │
//! │ Future:   []                   <- branch discard │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! # Live updates
//!
//! A non-committing [`replace`](HistoryState::replace) swaps the present in
//! place. The last committed present is kept as the *anchor*, so a later
//! commit pushes the pre-edit value onto `past` and never a live-only one.
//!
//! # Invariants
//!
//! 1. `present` is always defined.
//! 2. Every snapshot in `past` and `future` was a committed present.
//! 3. A committing replace leaves `future` empty.
//! 4. A live replace never changes `past.len()` or `future.len()`.
//! 5. `past.len() <= config.max_depth` after every operation.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Configuration for the edit history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of undo steps kept in `past`.
    /// Oldest steps are evicted first when the limit is exceeded.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl HistoryConfig {
    /// Keep at most `max_depth` undo steps.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// No cap on undo steps.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// Past/present/future snapshots of an edited value.
pub struct HistoryState<T> {
    /// Committed snapshots available for undo (newest at back).
    past: VecDeque<Arc<T>>,
    /// The visible value. May be live.
    present: Arc<T>,
    /// Last committed present while `present` is live.
    anchor: Option<Arc<T>>,
    /// Snapshots available for redo (nearest at front).
    future: VecDeque<Arc<T>>,
    config: HistoryConfig,
}

impl<T: fmt::Debug> fmt::Debug for HistoryState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryState")
            .field("past_len", &self.past.len())
            .field("future_len", &self.future.len())
            .field("live", &self.is_live())
            .field("config", &self.config)
            .finish()
    }
}

impl<T> HistoryState<T> {
    /// Start a history at `initial` with no undo or redo steps.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_config(initial, HistoryConfig::default())
    }

    /// Start a history with an explicit configuration.
    #[must_use]
    pub fn with_config(initial: T, config: HistoryConfig) -> Self {
        Self {
            past: VecDeque::new(),
            present: Arc::new(initial),
            anchor: None,
            future: VecDeque::new(),
            config,
        }
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Set a new present.
    ///
    /// With `commit`, the last committed present is pushed onto `past` and
    /// `future` is discarded. Without it, only the present changes.
    pub fn replace(&mut self, state: T, commit: bool) {
        self.replace_arc(Arc::new(state), commit);
    }

    /// [`replace`](Self::replace) with a pre-wrapped snapshot.
    pub fn replace_arc(&mut self, state: Arc<T>, commit: bool) {
        let previous = std::mem::replace(&mut self.present, state);
        if commit {
            let base = self.anchor.take().unwrap_or(previous);
            self.past.push_back(base);
            self.future.clear();
            self.enforce_depth();
            tracing::trace!(
                target: "carousel.history",
                past_len = self.past.len(),
                "committed snapshot"
            );
        } else if self.anchor.is_none() {
            self.anchor = Some(previous);
        }
    }

    /// Commit a live present as one step.
    ///
    /// Returns `false` (and does nothing) when the present is already
    /// committed.
    pub fn settle(&mut self) -> bool {
        if self.anchor.is_none() {
            return false;
        }
        let present = Arc::clone(&self.present);
        self.replace_arc(present, true);
        true
    }

    /// Step back to the previous committed snapshot.
    ///
    /// Returns `false` (and does nothing, even while live) if `past` is
    /// empty. A live present is dropped and its anchor goes to `future`,
    /// so the stacks only ever hold committed values. Callers that want
    /// live edits kept as a step [`settle`](Self::settle) first.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = self.take_committed(previous);
        self.future.push_front(current);
        tracing::trace!(
            target: "carousel.history",
            past_len = self.past.len(),
            future_len = self.future.len(),
            "undo"
        );
        true
    }

    /// Step forward to the nearest undone snapshot.
    ///
    /// Returns `false` if `future` is empty. As with [`undo`](Self::undo),
    /// a live present is dropped in favour of its anchor.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = self.take_committed(next);
        self.past.push_back(current);
        self.enforce_depth();
        tracing::trace!(
            target: "carousel.history",
            past_len = self.past.len(),
            future_len = self.future.len(),
            "redo"
        );
        true
    }

    /// Reset to `state` with no history. Never an undoable step.
    pub fn seed(&mut self, state: T) {
        self.past.clear();
        self.future.clear();
        self.anchor = None;
        self.present = Arc::new(state);
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// The visible value.
    #[must_use]
    pub fn present(&self) -> &T {
        &self.present
    }

    /// The visible value as a shared snapshot.
    #[must_use]
    pub fn present_arc(&self) -> &Arc<T> {
        &self.present
    }

    /// The last committed present (equal to `present` unless live).
    #[must_use]
    pub fn committed(&self) -> &Arc<T> {
        self.anchor.as_ref().unwrap_or(&self.present)
    }

    /// Whether the present holds uncommitted live edits.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.anchor.is_some()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    #[must_use]
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Undo snapshots, oldest first.
    pub fn past(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.past.iter().map(|s| &**s)
    }

    /// Redo snapshots, nearest first.
    pub fn future(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.future.iter().map(|s| &**s)
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Install `next` as the present and return the last committed one.
    fn take_committed(&mut self, next: Arc<T>) -> Arc<T> {
        let current = std::mem::replace(&mut self.present, next);
        match self.anchor.take() {
            Some(anchor) => {
                tracing::trace!(target: "carousel.history", "dropped live present");
                anchor
            }
            None => current,
        }
    }

    /// Evict the oldest undo steps beyond `max_depth`.
    fn enforce_depth(&mut self) {
        while self.past.len() > self.config.max_depth {
            self.past.pop_front();
        }
    }
}

impl<T: Default> Default for HistoryState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
