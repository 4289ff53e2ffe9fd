//! Shared fixtures for integration tests.

use checkitout::board::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::RemoteTaskRecord,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
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

/// Reference "today" for integration tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap_or_default()
}

/// `today()` shifted by `days`.
pub fn day(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}

/// Remote document for a task assigned to `ana`, due in two days.
pub fn seeded_record(id: &str, status: TaskStatus) -> RemoteTaskRecord {
    let task = Task::create(
        TaskId::new(id),
        NewTask::new(format!("Task {id}"), "body")
            .with_due_date(day(2))
            .with_assignee("ana"),
        &FixedClock::on(day(-7)),
    )
    .with_status(status);
    RemoteTaskRecord::from_task(&task)
}
