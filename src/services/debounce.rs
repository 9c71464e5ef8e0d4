//! Deterministic per-purpose debounce timers.
//!
//! Each timer owns one pending value and one deadline. Scheduling while a
//! value is pending replaces it and resets the deadline, so rapid edits
//! collapse into a single firing. The timer is driven by the caller
//! passing `Instant`s, which keeps cancellation and tests deterministic
//! instead of relying on ambient runtime timers.

use std::time::{Duration, Instant};

/// A cancellable, single-purpose debounce timer.
#[derive(Debug)]
pub struct DebounceTimer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    due: Instant,
    value: T,
}

impl<T> DebounceTimer<T> {
    /// Creates a timer with a fixed quiet-period delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value` to fire after the quiet period, replacing any
    /// pending value and resetting the deadline.
    pub fn schedule(&mut self, now: Instant, value: T) {
        self.pending = Some(Pending {
            due: now + self.delay,
            value,
        });
    }

    /// Cancels the pending value, returning it if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// True while a value is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value if its quiet period has elapsed.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }
}
