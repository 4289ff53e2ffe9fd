//! Given steps for task board scenarios.

use super::world::{BoardWorld, run_async};
use crate::test_helpers::{day, seeded_record};
use checkitout::board::{
    adapters::memory::RemoteOperation,
    domain::{NewTask, TaskStatus},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an empty task board")]
fn empty_board(world: &mut BoardWorld) {
    *world = BoardWorld::default();
}

#[given(r#"a task board with task "{id}" in "{status}""#)]
fn board_with_task(
    world: &mut BoardWorld,
    id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(status.as_str())?;
    *world = BoardWorld::with_records(vec![seeded_record(&id, parsed)]);
    run_async(world.board.refresh()).wrap_err("load seeded board")?;
    world.original = world.task(&id);
    Ok(())
}

#[given("the remote store rejects the next create")]
fn remote_rejects_create(world: &mut BoardWorld) {
    world.remote.fail_next(RemoteOperation::Create);
}

#[given(r#"a task "{title}" described as "{description}" due tomorrow has been added"#)]
fn task_added(
    world: &mut BoardWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let input = NewTask::new(title, description).with_due_date(day(1));
    run_async(world.board.add_task(input)).wrap_err("add initial task for duplicate scenario")?;
    Ok(())
}
