//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use checkitout::board::{
    adapters::memory::{
        FixedDueDateAdvisor, InMemoryAssigneeStore, InMemoryRemoteStore, RecordingNotifier,
    },
    domain::{Task, TaskId, TaskStatus},
    ports::RemoteTaskRecord,
    services::{BoardController, BoardError},
};
use rstest::fixture;

use crate::test_helpers::{FixedClock, today};

/// Controller type used by the BDD world.
pub type TestBoard = BoardController<
    InMemoryRemoteStore,
    FixedDueDateAdvisor,
    InMemoryAssigneeStore,
    RecordingNotifier,
    FixedClock,
>;

/// Scenario world for task board behaviour tests.
pub struct BoardWorld {
    pub remote: InMemoryRemoteStore,
    pub board: TestBoard,
    pub original: Option<Task>,
    pub last_add_result: Option<Result<Task, BoardError>>,
    pub last_result: Option<Result<(), BoardError>>,
}

impl BoardWorld {
    /// Builds a world whose remote store already holds `records`.
    pub fn with_records(records: Vec<RemoteTaskRecord>) -> Self {
        let remote = InMemoryRemoteStore::with_records(records);
        let assignees = InMemoryAssigneeStore::with_names(["ana".to_owned()]);
        let board = BoardController::new(
            Arc::new(remote.clone()),
            Arc::new(FixedDueDateAdvisor::unavailable()),
            Arc::new(assignees),
            Arc::new(RecordingNotifier::new()),
            Arc::new(FixedClock::on(today())),
        );
        Self {
            remote,
            board,
            original: None,
            last_add_result: None,
            last_result: None,
        }
    }

    /// Returns the ids in `status`, top to bottom.
    pub fn ids(&self, status: TaskStatus) -> Vec<String> {
        self.board
            .tasks(status)
            .iter()
            .map(|task| task.id().as_str().to_owned())
            .collect()
    }

    /// Finds a task anywhere on the board.
    pub fn task(&self, id: &str) -> Option<Task> {
        self.board.store().find(&TaskId::new(id)).cloned()
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
