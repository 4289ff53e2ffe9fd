//! Which task, if any, is expanded on the board.

use crate::board::domain::{TaskId, TaskStatus};

/// Selection state of the board. At most one task is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing is selected.
    #[default]
    Deselected,
    /// One task is selected in one column.
    SelectedAt {
        /// Selected task.
        task_id: TaskId,
        /// Column the task was selected in.
        column: TaskStatus,
    },
}

impl Selection {
    /// Toggles selection of `task_id` in `column`: selecting it when it is
    /// not the current selection, deselecting it otherwise.
    pub fn click(&mut self, task_id: &TaskId, column: TaskStatus) {
        *self = if self.is_selected_at(task_id, column) {
            Self::Deselected
        } else {
            Self::SelectedAt {
                task_id: task_id.clone(),
                column,
            }
        };
    }

    /// Clears the selection when it lives in `column`.
    pub fn collapse(&mut self, column: TaskStatus) {
        if matches!(self, Self::SelectedAt { column: selected, .. } if *selected == column) {
            self.clear();
        }
    }

    /// Clears the selection when it points at `task_id`.
    pub fn clear_if(&mut self, task_id: &TaskId) {
        if self.task_id() == Some(task_id) {
            self.clear();
        }
    }

    /// Clears the selection unconditionally.
    pub fn clear(&mut self) {
        *self = Self::Deselected;
    }

    /// Returns the selected task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<&TaskId> {
        match self {
            Self::Deselected => None,
            Self::SelectedAt { task_id, .. } => Some(task_id),
        }
    }

    fn is_selected_at(&self, task_id: &TaskId, column: TaskStatus) -> bool {
        matches!(
            self,
            Self::SelectedAt { task_id: selected, column: selected_column }
                if selected == task_id && *selected_column == column
        )
    }
}
