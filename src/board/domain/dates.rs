//! Calendar date helpers.

use chrono::{DateTime, NaiveDate};
use mockable::Clock;

/// Returns today's calendar date according to `clock`, in UTC.
#[must_use]
pub fn today(clock: &impl Clock) -> NaiveDate {
    clock.utc().date_naive()
}

/// Parses an ISO-8601 date or RFC 3339 date-time into a calendar date.
///
/// Date-times yield the calendar date in their own offset, so a value
/// written as `+02:00` midnight stays on that day. Returns `None` for
/// anything else.
#[must_use]
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(date_time.date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// How close a due date is, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueDateUrgency {
    /// No due date is set.
    Unscheduled,
    /// The due date has passed.
    Overdue,
    /// The due date is today or within the configured window.
    DueSoon,
    /// The due date is further away than the window.
    OnTrack,
}

impl DueDateUrgency {
    /// Classifies `due_date` against `today` with a window of
    /// `due_soon_days` days.
    #[must_use]
    pub fn classify(due_date: Option<NaiveDate>, today: NaiveDate, due_soon_days: i64) -> Self {
        let Some(date) = due_date else {
            return Self::Unscheduled;
        };
        let remaining = date.signed_duration_since(today).num_days();
        if remaining < 0 {
            Self::Overdue
        } else if remaining <= due_soon_days {
            Self::DueSoon
        } else {
            Self::OnTrack
        }
    }
}
