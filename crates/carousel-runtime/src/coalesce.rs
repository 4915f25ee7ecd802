#![forbid(unsafe_code)]

//! Commit coalescing for fine-grained edits.
//!
//! UI controls report edits far more often than users think in steps: every
//! keystroke, every color-picker drag event. [`CommitCoalescer`] turns that
//! stream into discrete history steps, per edit channel:
//!
//! | Channel | Live updates | Step created |
//! |---------|--------------|--------------|
//! | [`Structural`](EditChannel::Structural) | none | immediately, one per edit |
//! | [`Continuous`](EditChannel::Continuous) | every change | once, on [`end_gesture`](CommitCoalescer::end_gesture) |
//! | [`FreeText`](EditChannel::FreeText) | every keystroke | once, after the debounce quiet period |
//!
//! # Design
//!
//! The coalescer never captures a document when a timer is armed. When the
//! text timer fires it settles whatever the history's present is at that
//! moment, so a structural edit that lands in between (say, deleting the
//! item being typed into) is never overwritten by a stale value.
//!
//! Only one live channel is open at a time: starting a drag while a text
//! burst is pending settles the text first, and vice versa, so two gestures
//! never share a step.

use web_time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::undo::HistoryState;

/// Default quiet period before a typing burst becomes a step.
pub const DEFAULT_TEXT_DEBOUNCE: Duration = Duration::from_millis(600);

/// How an edit reaches the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditChannel {
    /// Add/remove/reorder/import, toggles, discrete style picks.
    Structural,
    /// Pointer-driven inputs (color pickers, sliders).
    Continuous,
    /// Title and body typing.
    FreeText,
}

/// Counters for observing coalescing behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoalescerStats {
    /// Live updates applied without a step.
    pub live_updates: u64,
    /// Steps created by any channel.
    pub commits: u64,
    /// Text timer fires, including ones that found nothing to commit.
    pub text_fires: u64,
}

/// Routes edits to the history as live updates or committed steps.
#[derive(Debug, Clone)]
pub struct CommitCoalescer {
    text_timer: Debouncer,
    /// Live channel currently holding uncommitted edits.
    open: Option<EditChannel>,
    stats: CoalescerStats,
}

impl Default for CommitCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_DEBOUNCE)
    }
}

impl CommitCoalescer {
    /// Create a coalescer with the given free-text quiet period.
    #[must_use]
    pub fn new(text_debounce: Duration) -> Self {
        Self {
            text_timer: Debouncer::new(text_debounce),
            open: None,
            stats: CoalescerStats::default(),
        }
    }

    // ====================================================================
    // Channels
    // ====================================================================

    /// Commit `doc` as its own step.
    ///
    /// Pending live edits are settled first so they keep a step of their own.
    /// A pending text timer stays armed and later fires against the present.
    pub fn structural<T>(&mut self, history: &mut HistoryState<T>, doc: T) {
        self.settle_open(history);
        history.replace(doc, true);
        self.stats.commits += 1;
        tracing::debug!(
            target: "carousel.coalesce",
            channel = "structural",
            past_len = history.past_len(),
            "committed edit"
        );
    }

    /// Apply an intermediate value of a pointer gesture.
    pub fn continuous<T>(&mut self, history: &mut HistoryState<T>, doc: T) {
        self.enter(history, EditChannel::Continuous);
        history.replace(doc, false);
        self.stats.live_updates += 1;
    }

    /// Close a pointer gesture, committing its final value as one step.
    ///
    /// Returns whether a step was created.
    pub fn end_gesture<T>(&mut self, history: &mut HistoryState<T>) -> bool {
        if self.open != Some(EditChannel::Continuous) {
            return false;
        }
        self.open = None;
        self.commit_live(history, EditChannel::Continuous)
    }

    /// Apply a keystroke and restart the quiet period.
    pub fn free_text<T>(&mut self, history: &mut HistoryState<T>, doc: T, now: Instant) {
        self.enter(history, EditChannel::FreeText);
        history.replace(doc, false);
        self.text_timer.arm(now);
        self.stats.live_updates += 1;
    }

    // ====================================================================
    // Timers
    // ====================================================================

    /// Fire the text timer if due.
    ///
    /// Returns whether a step was created. A fire that finds nothing live
    /// (e.g. a structural edit already settled the text) is harmless.
    pub fn poll<T>(&mut self, history: &mut HistoryState<T>, now: Instant) -> bool {
        if !self.text_timer.poll(now) {
            return false;
        }
        self.stats.text_fires += 1;
        if self.open == Some(EditChannel::FreeText) {
            self.open = None;
            return self.commit_live(history, EditChannel::FreeText);
        }
        tracing::trace!(target: "carousel.coalesce", "text timer fired with nothing pending");
        false
    }

    /// Cancel the text timer and settle every open live edit now.
    ///
    /// Used before undo/redo so the step boundary is where the user sees it.
    pub fn flush<T>(&mut self, history: &mut HistoryState<T>) -> bool {
        self.text_timer.cancel();
        self.settle_open(history)
    }

    /// Drop pending timers without committing anything.
    ///
    /// Live edits stay in the present; they just never become a step.
    pub fn cancel(&mut self) {
        if self.text_timer.cancel() {
            tracing::debug!(
                target: "carousel.coalesce",
                "dropped pending text commit"
            );
        }
        self.open = None;
    }

    /// Forget channel state after the history was reset under us.
    pub fn reset(&mut self) {
        self.text_timer.cancel();
        self.open = None;
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// Deadline of the pending text commit, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.text_timer.deadline()
    }

    /// The live channel holding uncommitted edits, if any.
    #[must_use]
    pub fn open_channel(&self) -> Option<EditChannel> {
        self.open
    }

    #[must_use]
    pub fn text_debounce(&self) -> Duration {
        self.text_timer.delay()
    }

    pub fn set_text_debounce(&mut self, delay: Duration) {
        self.text_timer.set_delay(delay);
    }

    #[must_use]
    pub fn stats(&self) -> CoalescerStats {
        self.stats
    }

    // ====================================================================
    // Internals
    // ====================================================================

    fn enter<T>(&mut self, history: &mut HistoryState<T>, channel: EditChannel) {
        if self.open.is_some_and(|open| open != channel) {
            self.settle_open(history);
        }
        self.open = Some(channel);
    }

    fn settle_open<T>(&mut self, history: &mut HistoryState<T>) -> bool {
        let channel = self.open.take().unwrap_or(EditChannel::Structural);
        self.commit_live(history, channel)
    }

    fn commit_live<T>(&mut self, history: &mut HistoryState<T>, channel: EditChannel) -> bool {
        if !history.settle() {
            return false;
        }
        self.stats.commits += 1;
        tracing::debug!(
            target: "carousel.coalesce",
            channel = ?channel,
            past_len = history.past_len(),
            "settled live edits"
        );
        true
    }
}
