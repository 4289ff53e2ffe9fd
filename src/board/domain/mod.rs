//! Domain model for the task board.
//!
//! Everything in this module is pure: no I/O, no clocks read implicitly, and
//! no knowledge of how tasks are stored remotely beyond date normalization.

mod assignee;
mod dates;
mod error;
mod ids;
mod status;
mod task;

pub use assignee::AssigneeRegistry;
pub use dates::{DueDateUrgency, parse_iso_date, today};
pub use error::{ParseTaskStatusError, ValidationError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch};
