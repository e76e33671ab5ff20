//! Cancelable trailing-edge debounce timer.
//!
//! The timer never runs on its own thread: the owner polls it with the
//! current instant from its event loop and acts on the value it yields.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Holds at most one pending value until its deadline passes.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules `value` to fire one window after `now`.
    ///
    /// Returns `true` when an earlier pending value was canceled.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let deadline = now.checked_add(self.window).unwrap_or(now);
        self.pending
            .replace(Pending { value, deadline })
            .is_some()
    }

    /// Takes the pending value once its deadline is reached.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if !due {
            return None;
        }
        self.pending.take().map(|pending| pending.value)
    }

    /// Drops the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}
