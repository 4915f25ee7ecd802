#![forbid(unsafe_code)]

//! Cancel-and-restart timers driven by an explicit clock.
//!
//! A [`Debouncer`] has three operations: [`arm`](Debouncer::arm),
//! [`cancel`](Debouncer::cancel) and [`poll`](Debouncer::poll) (fire). It
//! never spawns threads or sleeps. The host loop passes `now` on every call
//! and uses [`deadline`](Debouncer::deadline) to schedule its next wake-up.
//!
//! # State Machine
//!
//! ```text
//!              arm(now)                    poll(now >= deadline)
//! ┌──────┐ ───────────▶ ┌─────────────────┐ ─────────────────────▶ fire
//! │ Idle │              │ Armed(deadline) │
//! └──────┘ ◀─────────── └─────────────────┘ ◀──┐
//!     ▲        cancel()          │  arm(now)   │ deadline = now + delay
//!     │                          └─────────────┘
//!     └──────────────────────── (after fire)
//! ```
//!
//! # Example
//!
//! ```
//! use carousel_runtime::debounce::Debouncer;
//! use web_time::{Duration, Instant};
//!
//! let mut timer = Debouncer::new(Duration::from_millis(600));
//! let t0 = Instant::now();
//!
//! timer.arm(t0);
//! timer.arm(t0 + Duration::from_millis(500)); // restarts the window
//! assert!(!timer.poll(t0 + Duration::from_millis(900)));
//! assert!(timer.poll(t0 + Duration::from_millis(1100)));
//! assert!(!timer.is_armed());
//! ```

use web_time::{Duration, Instant};

/// A single pending deadline that restarts on every arm.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create an idle timer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start or restart the quiet period at `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending deadline without firing.
    ///
    /// Returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Fire if the deadline has passed.
    ///
    /// Returns `true` exactly once per armed period; the timer is idle
    /// afterwards.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending period ends, if armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, zero if already due.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the quiet period. A pending deadline keeps its old value.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(600);
    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn idle_timer_never_fires() {
        let mut timer = Debouncer::new(DELAY);
        let now = Instant::now();
        assert!(!timer.is_armed());
        assert!(!timer.poll(now + DELAY * 10));
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn fires_once_after_delay() {
        let mut timer = Debouncer::new(DELAY);
        let t0 = Instant::now();
        timer.arm(t0);

        assert!(!timer.poll(t0 + DELAY - MS_100));
        assert!(timer.poll(t0 + DELAY));
        assert!(!timer.poll(t0 + DELAY + MS_100));
    }

    #[test]
    fn rearm_restarts_window() {
        let mut timer = Debouncer::new(DELAY);
        let t0 = Instant::now();
        timer.arm(t0);
        timer.arm(t0 + MS_100 * 5);

        assert!(!timer.poll(t0 + DELAY));
        assert_eq!(timer.deadline(), Some(t0 + MS_100 * 5 + DELAY));
        assert!(timer.poll(t0 + MS_100 * 5 + DELAY));
    }

    #[test]
    fn cancel_discards_pending_fire() {
        let mut timer = Debouncer::new(DELAY);
        let t0 = Instant::now();
        timer.arm(t0);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.poll(t0 + DELAY * 2));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let mut timer = Debouncer::new(DELAY);
        let t0 = Instant::now();
        assert_eq!(timer.remaining(t0), None);
        timer.arm(t0);
        assert_eq!(timer.remaining(t0 + MS_100), Some(DELAY - MS_100));
        assert_eq!(timer.remaining(t0 + DELAY * 3), Some(Duration::ZERO));
    }

    #[test]
    fn set_delay_applies_to_next_arm() {
        let mut timer = Debouncer::new(DELAY);
        let t0 = Instant::now();
        timer.arm(t0);
        timer.set_delay(MS_100);
        assert_eq!(timer.deadline(), Some(t0 + DELAY));
        timer.arm(t0);
        assert_eq!(timer.deadline(), Some(t0 + MS_100));
        assert_eq!(timer.delay(), MS_100);
    }
}
