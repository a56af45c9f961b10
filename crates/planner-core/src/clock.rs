//! Source of "today" for request handlers.
//!
//! The recurrence engine never reads the wall clock itself; the service layer
//! asks a [`Clock`] and passes the date down explicitly.

use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    /// Current calendar date in the server's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation backed by the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to a single date, used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
