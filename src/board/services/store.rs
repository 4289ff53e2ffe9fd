//! In-memory task partitions with optimistic mutation and rollback.

use crate::board::domain::{Task, TaskId, TaskPatch, TaskStatus};
use thiserror::Error;

/// Errors returned by [`TaskStore`] lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    /// The task is not in the expected partition.
    #[error("task {id} not found in {status}")]
    NotFound {
        /// Requested task.
        id: TaskId,
        /// Partition that was searched.
        status: TaskStatus,
    },

    /// The task is not in any partition.
    #[error("task {0} not found")]
    Unknown(TaskId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Partitions {
    pending: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl Partitions {
    const fn get(&self, status: TaskStatus) -> &Vec<Task> {
        match status {
            TaskStatus::Pending => &self.pending,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    const fn get_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Returns the partition and index currently holding `id`.
    fn locate(&self, id: &TaskId) -> Option<(TaskStatus, usize)> {
        TaskStatus::ALL.into_iter().find_map(|status| {
            self.get(status)
                .iter()
                .position(|task| task.id() == id)
                .map(|index| (status, index))
        })
    }
}

/// Captured copy of all three partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    partitions: Partitions,
}

/// The board's tasks, partitioned by status, newest first.
///
/// Each task id lives in exactly one partition. The store does not serialise
/// concurrent operations on the same task; callers guard that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    partitions: Partitions,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every partition with `tasks`, split by status.
    ///
    /// Relative order within a status is preserved.
    pub fn load(&mut self, tasks: impl IntoIterator<Item = Task>) {
        let mut partitions = Partitions::default();
        for task in tasks {
            partitions.get_mut(task.status()).push(task);
        }
        self.partitions = partitions;
    }

    /// Prepends `task` to the pending partition.
    ///
    /// Callers validate the task beforehand.
    pub fn add(&mut self, task: Task) {
        self.partitions.pending.insert(0, task);
    }

    /// Moves the task with `id` from `from` to the front of `to`, updating
    /// its status. Moving within one partition brings it to the front.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when `from` does not hold `id`;
    /// nothing is changed in that case.
    pub fn move_task(
        &mut self,
        id: &TaskId,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<(), TaskStoreError> {
        let task = self.remove_from(id, from)?;
        self.partitions.get_mut(to).insert(0, task.with_status(to));
        Ok(())
    }

    /// Replaces the editable fields of the task with `id`, keeping its
    /// position. Returns the task as it was before the edit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unknown`] when no partition holds `id`.
    pub fn edit(&mut self, id: &TaskId, patch: &TaskPatch) -> Result<Task, TaskStoreError> {
        let slot = self
            .find_mut(id)
            .ok_or_else(|| TaskStoreError::Unknown(id.clone()))?;
        let previous = slot.clone();
        *slot = previous.with_patch(patch);
        Ok(previous)
    }

    /// Removes the task with `id` from `status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when `status` does not hold `id`.
    pub fn remove_from(&mut self, id: &TaskId, status: TaskStatus) -> Result<Task, TaskStoreError> {
        let partition = self.partitions.get_mut(status);
        let index = partition
            .iter()
            .position(|task| task.id() == id)
            .ok_or_else(|| TaskStoreError::NotFound {
                id: id.clone(),
                status,
            })?;
        Ok(partition.remove(index))
    }

    /// Removes the task with `id` from whichever partition holds it.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let (status, index) = self.partitions.locate(id)?;
        Some(self.partitions.get_mut(status).remove(index))
    }

    /// Replaces the identifier of a task in place. Returns `false` when no
    /// partition holds `old`.
    pub fn rekey(&mut self, old: &TaskId, new: TaskId) -> bool {
        let Some(slot) = self.find_mut(old) else {
            return false;
        };
        *slot = slot.with_id(new);
        true
    }

    /// Captures the current partitions.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            partitions: self.partitions.clone(),
        }
    }

    /// Restores every partition from `snapshot`.
    pub fn rollback(&mut self, snapshot: Snapshot) {
        self.partitions = snapshot.partitions;
    }

    /// Restores only the task with `id` to its partition and position in
    /// `snapshot`, leaving every other task untouched. A task absent from
    /// the snapshot is removed.
    pub fn revert(&mut self, id: &TaskId, snapshot: &Snapshot) {
        self.remove(id);
        let Some((status, index)) = snapshot.partitions.locate(id) else {
            return;
        };
        let Some(task) = snapshot.partitions.get(status).get(index) else {
            return;
        };
        let partition = self.partitions.get_mut(status);
        let position = index.min(partition.len());
        partition.insert(position, task.clone());
    }

    /// Returns the tasks in `status`, newest first.
    #[must_use]
    pub fn tasks(&self, status: TaskStatus) -> &[Task] {
        self.partitions.get(status)
    }

    /// Iterates over every task, partition by partition.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        TaskStatus::ALL
            .into_iter()
            .flat_map(|status| self.partitions.get(status).iter())
    }

    /// Returns the task with `id`, if any partition holds it.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.iter().find(|task| task.id() == id)
    }

    /// Returns `true` when any task has `title`, ignoring case.
    #[must_use]
    pub fn has_title(&self, title: &str) -> bool {
        self.iter().any(|task| task.has_title(title))
    }

    /// Returns the total number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        TaskStatus::ALL
            .into_iter()
            .map(|status| self.partitions.get(status).len())
            .sum()
    }

    /// Returns `true` when the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        let (status, index) = self.partitions.locate(id)?;
        self.partitions.get_mut(status).get_mut(index)
    }
}
