//! Gravity timer
//!
//! An interval timer whose period shrinks a little on every firing:
//!
//! ```text
//! next = prev - prev / (3000 - 10 * level)
//! ```
//!
//! seeded at 500000 microseconds. The decay is steeper at higher levels, giving an
//! exponentially decaying descent interval.
//!
//! The timer is a deadline, not a thread. The input source waits for keys with a timeout
//! of [`GravityTimer::remaining`] and calls [`GravityTimer::poll`] when the wait ends.
//! A due deadline yields exactly one firing and re-arms from the current instant, so
//! firings missed while the loop was busy (paused, presenting a line clear) are deferred
//! and coalesced into a single descend request rather than queued or dropped.

use std::time::{Duration, Instant};

use crate::types::{GRAVITY_DECAY_BASE, GRAVITY_DECAY_PER_LEVEL, INITIAL_GRAVITY_US};

/// Derive the next gravity period (microseconds) from the previous one.
///
/// The divisor is clamped to at least 1 and the result to at least 1 microsecond, so
/// absurd levels degrade to "as fast as possible" instead of dividing by zero or
/// disarming the timer.
///
/// # Examples
///
/// ```
/// use micro_tetris_core::gravity::next_period;
///
/// assert_eq!(next_period(500_000, 1), 499_833);
/// assert!(next_period(500_000, 20) < next_period(500_000, 1));
/// ```
pub fn next_period(prev_us: u64, level: u32) -> u64 {
    let divisor = GRAVITY_DECAY_BASE - GRAVITY_DECAY_PER_LEVEL * i64::from(level);
    let divisor = divisor.max(1) as u64;
    prev_us.saturating_sub(prev_us / divisor).max(1)
}

/// Deadline-based gravity timer.
#[derive(Debug, Clone)]
pub struct GravityTimer {
    period_us: u64,
    deadline: Option<Instant>,
    disarmed: bool,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self {
            period_us: INITIAL_GRAVITY_US,
            deadline: None,
            disarmed: false,
        }
    }

    /// Current period in microseconds
    pub fn period_us(&self) -> u64 {
        self.period_us
    }

    pub fn period(&self) -> Duration {
        Duration::from_micros(self.period_us)
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start the timer: reseed the period, decay it once for `level` and schedule the
    /// first firing. Ignored after [`GravityTimer::disarm`].
    pub fn arm(&mut self, now: Instant, level: u32) {
        if self.disarmed {
            return;
        }
        self.period_us = next_period(INITIAL_GRAVITY_US, level);
        self.deadline = Some(now + self.period());
    }

    /// Stop the timer for good; no firing is reported afterwards.
    pub fn disarm(&mut self) {
        self.disarmed = true;
        self.deadline = None;
    }

    /// Time left until the next firing; `None` when not armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Report whether the timer fired by `now`.
    ///
    /// Returns true at most once per elapsed deadline, however late the poll is. On
    /// firing the period is re-derived for `level` and the next deadline counts from `now`.
    pub fn poll(&mut self, now: Instant, level: u32) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.period_us = next_period(self.period_us, level);
                self.deadline = Some(now + self.period());
                true
            }
            _ => false,
        }
    }
}

impl Default for GravityTimer {
    fn default() -> Self {
        Self::new()
    }
}
