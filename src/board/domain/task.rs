//! Task aggregate and the value types used to create and edit it.

use super::{TaskId, TaskStatus, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
    assignee: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a task read from the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Remote document identifier.
    pub id: TaskId,
    /// Stored title.
    pub title: String,
    /// Stored description.
    pub description: String,
    /// Normalized due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Stored status.
    pub status: TaskStatus,
    /// Stored assignee, if any.
    pub assignee: Option<String>,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// User input for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Task title; must be unique ignoring case.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Chosen due date.
    pub due_date: Option<NaiveDate>,
    /// Assignee picked from the registry.
    pub assignee: Option<String>,
}

impl NewTask {
    /// Creates input with the required text fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: None,
            assignee: None,
        }
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Checks that title and description carry text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] when either is blank.
    pub fn ensure_text_present(&self) -> Result<(), ValidationError> {
        ensure_text_present(&self.title, &self.description)
    }
}

/// The editable subset of a task.
///
/// Status, assignee and creation time are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: String,
    /// Replacement description.
    pub description: String,
    /// Replacement due date.
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    /// Creates a patch.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date,
        }
    }

    /// Checks that title and description carry text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] when either is blank.
    pub fn ensure_text_present(&self) -> Result<(), ValidationError> {
        ensure_text_present(&self.title, &self.description)
    }
}

fn ensure_text_present(title: &str, description: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

impl Task {
    /// Creates a pending task from validated input, stamped with the clock's
    /// current time.
    #[must_use]
    pub fn create(id: TaskId, input: NewTask, clock: &impl Clock) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: TaskStatus::Pending,
            assignee: input.assignee,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task read from the remote store.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            assignee: data.assignee,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when `title` matches this task's title ignoring case.
    #[must_use]
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Returns a copy of this task carrying `status`.
    #[must_use]
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Returns a copy of this task with the editable fields replaced.
    #[must_use]
    pub fn with_patch(&self, patch: &TaskPatch) -> Self {
        Self {
            title: patch.title.clone(),
            description: patch.description.clone(),
            due_date: patch.due_date,
            ..self.clone()
        }
    }

    /// Returns a copy of this task under a different identifier.
    #[must_use]
    pub fn with_id(&self, id: TaskId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}
