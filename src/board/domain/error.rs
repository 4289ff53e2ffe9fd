//! Error types for task validation and parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Input rejected before any local or remote mutation happens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Title or description is empty after trimming.
    #[error("task title and description are required")]
    MissingFields,

    /// No due date was chosen.
    #[error("a due date is required")]
    MissingDueDate,

    /// Another task already uses this title, ignoring case.
    #[error("a task titled '{0}' already exists")]
    DuplicateTitle(String),

    /// The chosen due date lies before today.
    #[error("due date {0} is in the past")]
    PastDueDate(NaiveDate),

    /// The assignee is not present in the registry.
    #[error("unknown assignee: {0}")]
    UnknownAssignee(String),

    /// An assignee name is empty after trimming.
    #[error("assignee name must not be empty")]
    EmptyAssigneeName,
}

/// Error returned while parsing task statuses from the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
