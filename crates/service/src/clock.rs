//! Source of "today" for temporal business rules.

use chrono::{NaiveDate, Utc};

pub trait Clock: Send + Sync {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock, evaluated on every call. Dates are taken in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a single date, for tests and fixtures.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
