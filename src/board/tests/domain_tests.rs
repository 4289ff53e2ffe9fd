//! Unit tests for domain values.

use super::{FixedClock, day, today};
use crate::board::domain::{
    AssigneeRegistry, DueDateUrgency, NewTask, ParseTaskStatusError, Task, TaskId, TaskPatch,
    TaskStatus, ValidationError, parse_iso_date,
};
use chrono::NaiveDate;
use rstest::rstest;

#[rstest]
#[case("pending", TaskStatus::Pending)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("done", TaskStatus::Done)]
#[case("  DONE ", TaskStatus::Done)]
#[case("Pendiente", TaskStatus::Pending)]
#[case("En Progreso", TaskStatus::InProgress)]
#[case("Completada", TaskStatus::Done)]
fn status_parses_canonical_and_legacy_labels(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn status_rejects_unknown_label() {
    assert_eq!(
        TaskStatus::try_from("archived"),
        Err(ParseTaskStatusError("archived".to_owned()))
    );
}

#[rstest]
fn status_round_trips_through_storage_representation() {
    for status in TaskStatus::ALL {
        assert_eq!(TaskStatus::try_from(status.as_str()), Ok(status));
    }
}

#[rstest]
#[case("2026-10-19", NaiveDate::from_ymd_opt(2026, 10, 19))]
#[case("2026-10-19T23:30:00Z", NaiveDate::from_ymd_opt(2026, 10, 19))]
#[case("2026-10-19T23:30:00-05:00", NaiveDate::from_ymd_opt(2026, 10, 19))]
#[case("2026-10-20T00:00:00+02:00", NaiveDate::from_ymd_opt(2026, 10, 20))]
#[case(" 2026-10-19 ", NaiveDate::from_ymd_opt(2026, 10, 19))]
#[case("next tuesday", None)]
#[case("2026-13-01", None)]
#[case("", None)]
fn parse_iso_date_handles_dates_and_date_times(
    #[case] raw: &str,
    #[case] expected: Option<NaiveDate>,
) {
    assert_eq!(parse_iso_date(raw), expected);
}

#[rstest]
#[case(None, DueDateUrgency::Unscheduled)]
#[case(Some(day(-1)), DueDateUrgency::Overdue)]
#[case(Some(day(0)), DueDateUrgency::DueSoon)]
#[case(Some(day(3)), DueDateUrgency::DueSoon)]
#[case(Some(day(4)), DueDateUrgency::OnTrack)]
fn urgency_classifies_against_window(
    #[case] due_date: Option<NaiveDate>,
    #[case] expected: DueDateUrgency,
) {
    assert_eq!(DueDateUrgency::classify(due_date, today(), 3), expected);
}

#[rstest]
fn new_task_requires_title_and_description() {
    assert_eq!(
        NewTask::new("  ", "body").ensure_text_present(),
        Err(ValidationError::MissingFields)
    );
    assert_eq!(
        NewTask::new("title", "").ensure_text_present(),
        Err(ValidationError::MissingFields)
    );
    assert_eq!(NewTask::new("title", "body").ensure_text_present(), Ok(()));
}

#[rstest]
fn created_task_is_pending_and_stamped_by_clock() {
    let clock = FixedClock::on(today());
    let input = NewTask::new("Write report", "Q3 summary")
        .with_due_date(day(1))
        .with_assignee("ana");

    let task = Task::create(TaskId::new("t1"), input, &clock);

    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.created_at().date_naive(), today());
    assert_eq!(task.due_date(), Some(day(1)));
    assert_eq!(task.assignee(), Some("ana"));
}

#[rstest]
fn patch_leaves_status_assignee_and_creation_time_alone() {
    let clock = FixedClock::on(today());
    let task = Task::create(
        TaskId::new("t1"),
        NewTask::new("Write report", "Q3 summary")
            .with_due_date(day(1))
            .with_assignee("ana"),
        &clock,
    )
    .with_status(TaskStatus::InProgress);

    let edited = task.with_patch(&TaskPatch::new("Write report", "Q4 summary", Some(day(2))));

    assert_eq!(edited.description(), "Q4 summary");
    assert_eq!(edited.due_date(), Some(day(2)));
    assert_eq!(edited.status(), TaskStatus::InProgress);
    assert_eq!(edited.assignee(), task.assignee());
    assert_eq!(edited.created_at(), task.created_at());
    assert_eq!(edited.id(), task.id());
}

#[rstest]
fn title_comparison_ignores_case() {
    let task = Task::create(
        TaskId::new("t1"),
        NewTask::new("Standup", "daily"),
        &FixedClock::on(today()),
    );
    assert!(task.has_title("STANDUP"));
    assert!(task.has_title("standup"));
    assert!(!task.has_title("Standup notes"));
}

#[rstest]
fn registry_deduplicates_and_keeps_order() -> eyre::Result<()> {
    let mut registry = AssigneeRegistry::new();

    eyre::ensure!(registry.add("ana")?);
    eyre::ensure!(registry.add(" luis ")?);
    eyre::ensure!(!registry.add("ana")?);

    assert_eq!(registry.names(), ["ana".to_owned(), "luis".to_owned()]);
    Ok(())
}

#[rstest]
fn registry_rejects_blank_names() {
    let mut registry = AssigneeRegistry::new();
    assert_eq!(registry.add("   "), Err(ValidationError::EmptyAssigneeName));
    assert!(registry.is_empty());
}

#[rstest]
fn registry_removal_reports_change() {
    let mut registry = AssigneeRegistry::from_names(["ana".to_owned(), "luis".to_owned()]);

    assert!(registry.remove("ana"));
    assert!(!registry.remove("ana"));
    assert_eq!(registry.names(), ["luis".to_owned()]);
}

#[rstest]
fn registry_from_names_drops_blanks_and_duplicates() {
    let registry = AssigneeRegistry::from_names(
        ["ana", "", "ana", "luis"].into_iter().map(str::to_owned),
    );
    assert_eq!(registry.len(), 2);
}
