//! User-facing notification port.

use crate::board::domain::{TaskId, TaskStatus, ValidationError};

/// Receives outcomes the view layer should show to the user.
///
/// Implementations must not block; they are called on the same logical
/// thread as every board operation.
pub trait Notifier: Send + Sync {
    /// Delivers one notification.
    fn notify(&self, notification: Notification);
}

/// The write a notification refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    /// A task was added.
    Add {
        /// Title of the new task.
        title: String,
    },
    /// A task changed column.
    Move {
        /// Moved task.
        id: TaskId,
        /// Source column.
        from: TaskStatus,
        /// Target column.
        to: TaskStatus,
    },
    /// A task was deleted.
    Delete {
        /// Deleted task.
        id: TaskId,
    },
    /// A task's details were edited.
    Edit {
        /// Edited task.
        id: TaskId,
    },
    /// The assignee registry was saved.
    SaveAssignees,
}

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The remote store confirmed a write.
    Confirmed(BoardAction),
    /// The remote store rejected a write; local state was reverted.
    Failed {
        /// The rejected write.
        action: BoardAction,
        /// Error text.
        reason: String,
    },
    /// Input was rejected before anything changed. Shown as a blocking prompt.
    Rejected(ValidationError),
    /// Tasks could not be loaded; the board keeps its last known state.
    LoadFailed(String),
    /// The live feed reported an error; the board keeps its last known state.
    SubscriptionFailed(String),
    /// The advisor could not suggest a date. Shown inline, never blocking.
    AdviceUnavailable(String),
}

impl Notification {
    /// Returns `true` for notifications rendered as errors.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Confirmed(_))
    }
}
