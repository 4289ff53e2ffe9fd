//! When steps for task board scenarios.

use super::world::{BoardWorld, run_async};
use crate::test_helpers::day;
use checkitout::board::domain::{NewTask, TaskId, TaskPatch, TaskStatus};
use rstest_bdd_macros::when;

#[when(r#"a task "{title}" described as "{description}" due tomorrow is added"#)]
fn add_task(world: &mut BoardWorld, title: String, description: String) {
    let input = NewTask::new(title, description).with_due_date(day(1));
    world.last_add_result = Some(run_async(world.board.add_task(input)));
}

#[when(r#"task "{id}" is moved from "{from}" to "{to}""#)]
fn move_task(
    world: &mut BoardWorld,
    id: String,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    let source = TaskStatus::try_from(from.as_str())?;
    let target = TaskStatus::try_from(to.as_str())?;
    world.last_result = Some(run_async(world.board.move_task(
        &TaskId::new(id),
        source,
        target,
    )));
    Ok(())
}

#[when(r#"deletion of task "{id}" from "{column}" is confirmed"#)]
fn confirm_deletion(
    world: &mut BoardWorld,
    id: String,
    column: String,
) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(column.as_str())?;
    world.board.request_delete(&TaskId::new(id), parsed);
    world.last_result = Some(run_async(world.board.confirm_delete()));
    Ok(())
}

#[when(r#"the description of task "{id}" is changed to "{description}""#)]
fn change_description(
    world: &mut BoardWorld,
    id: String,
    description: String,
) -> Result<(), eyre::Report> {
    let current = world
        .task(&id)
        .ok_or_else(|| eyre::eyre!("task {id} is not on the board"))?;
    let patch = TaskPatch::new(current.title(), description, current.due_date());
    let result = run_async(world.board.edit_task(&TaskId::new(id), patch)).map(|_| ());
    world.last_result = Some(result);
    Ok(())
}
