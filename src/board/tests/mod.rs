//! Unit tests for the task board.

mod domain_tests;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at noon UTC on `date`.
    pub(super) fn on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self(Utc.from_utc_datetime(&noon))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Reference "today" used across the unit tests.
pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap_or_default()
}

/// `today()` shifted by `days`.
pub(super) fn day(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}
