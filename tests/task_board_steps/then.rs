//! Then steps for task board scenarios.

use super::world::BoardWorld;
use checkitout::board::{
    domain::{TaskStatus, ValidationError},
    services::BoardError,
};
use rstest_bdd_macros::then;

fn last_error(world: &BoardWorld) -> Result<&BoardError, eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no operation was attempted"))?;
    result
        .as_ref()
        .err()
        .ok_or_else(|| eyre::eyre!("expected the operation to fail"))
}

fn last_add_error(world: &BoardWorld) -> Result<&BoardError, eyre::Report> {
    let result = world
        .last_add_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no add was attempted"))?;
    result
        .as_ref()
        .err()
        .ok_or_else(|| eyre::eyre!("expected the add to fail"))
}

#[then("the add fails with a remote failure")]
fn add_fails_remotely(world: &BoardWorld) -> Result<(), eyre::Report> {
    match last_add_error(world)? {
        BoardError::Remote(_) => Ok(()),
        other => Err(eyre::eyre!("expected remote failure, got {other:?}")),
    }
}

#[then("the add fails with a duplicate title error")]
fn add_fails_duplicate(world: &BoardWorld) -> Result<(), eyre::Report> {
    match last_add_error(world)? {
        BoardError::Validation(ValidationError::DuplicateTitle(_)) => Ok(()),
        other => Err(eyre::eyre!("expected duplicate title, got {other:?}")),
    }
}

#[then("the operation fails with a not found error")]
fn operation_not_found(world: &BoardWorld) -> Result<(), eyre::Report> {
    match last_error(world)? {
        BoardError::NotFound(_) => Ok(()),
        other => Err(eyre::eyre!("expected not found, got {other:?}")),
    }
}

#[then(r#"the "{status}" column is empty"#)]
fn column_is_empty(world: &BoardWorld, status: String) -> Result<(), eyre::Report> {
    let column = TaskStatus::try_from(status.as_str())?;
    let ids = world.ids(column);
    eyre::ensure!(ids.is_empty(), "expected {column} to be empty, found {ids:?}");
    Ok(())
}

#[then("the board holds {count:usize} task")]
fn board_holds(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let total = world.board.store().len();
    eyre::ensure!(total == count, "expected {count} tasks, found {total}");
    Ok(())
}

#[then(r#"task "{id}" is only in the "{status}" column"#)]
fn only_in_column(world: &BoardWorld, id: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    for column in TaskStatus::ALL {
        let present = world.ids(column).contains(&id);
        eyre::ensure!(
            present == (column == expected),
            "task {id} presence in {column} was {present}"
        );
    }
    if world.last_result.as_ref().is_some_and(Result::is_ok) {
        let persisted = world.remote.records().into_iter().any(|record| {
            record.id.as_str() == id && record.status.as_deref() == Some(expected.as_str())
        });
        eyre::ensure!(
            persisted,
            "remote document for {id} does not carry status {expected}"
        );
    }
    Ok(())
}

#[then(r#"task "{id}" has status "{status}""#)]
fn has_status(world: &BoardWorld, id: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let task = world
        .task(&id)
        .ok_or_else(|| eyre::eyre!("task {id} is not on the board"))?;
    eyre::ensure!(task.status() == expected, "task {id} is {}", task.status());
    Ok(())
}

#[then(r#"task "{id}" has description "{description}""#)]
fn has_description(
    world: &BoardWorld,
    id: String,
    description: String,
) -> Result<(), eyre::Report> {
    let task = world
        .task(&id)
        .ok_or_else(|| eyre::eyre!("task {id} is not on the board"))?;
    eyre::ensure!(
        task.description() == description,
        "task {id} has description {:?}",
        task.description()
    );
    Ok(())
}

#[then(r#"task "{id}" keeps its assignee and creation time"#)]
fn keeps_untouched_fields(world: &BoardWorld, id: String) -> Result<(), eyre::Report> {
    let original = world
        .original
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no original task captured"))?;
    let task = world
        .task(&id)
        .ok_or_else(|| eyre::eyre!("task {id} is not on the board"))?;
    eyre::ensure!(task.assignee() == original.assignee(), "assignee changed");
    eyre::ensure!(task.created_at() == original.created_at(), "creation time changed");
    eyre::ensure!(task.status() == original.status(), "status changed");
    Ok(())
}

#[then("no deletion awaits confirmation")]
fn no_pending_deletion(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.board.pending_deletion().is_none(),
        "a deletion is still pending"
    );
    Ok(())
}
