//! Time sources for timestamps and debounce deadlines.

use chrono::{DateTime, Local, NaiveDate, Utc};
use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of monotonic and wall-clock time.
pub trait Clock {
    /// Monotonic instant used for debounce deadlines.
    fn instant(&self) -> Instant;
    /// Wall-clock instant used for entry timestamps.
    fn now(&self) -> DateTime<Utc>;
    /// Calendar date used for date-field defaults.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn instant(&self) -> Instant {
        (**self).instant()
    }

    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock; both time sources move only on `advance`.
#[derive(Debug)]
pub struct ManualClock {
    instant: Cell<Instant>,
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            instant: Cell::new(Instant::now()),
            now: Cell::new(start),
        }
    }

    /// Moves both time sources forward by `by`.
    ///
    /// A step that would overflow a source leaves that source unchanged.
    pub fn advance(&self, by: Duration) {
        let instant = self.instant.get();
        self.instant.set(instant.checked_add(by).unwrap_or(instant));
        let now = self.now.get();
        let later = chrono::Duration::from_std(by)
            .ok()
            .and_then(|step| now.checked_add_signed(step))
            .unwrap_or(now);
        self.now.set(later);
    }
}

impl Clock for ManualClock {
    fn instant(&self) -> Instant {
        self.instant.get()
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    /// UTC date, so tests do not depend on the host timezone.
    fn today(&self) -> NaiveDate {
        self.now.get().date_naive()
    }
}
