//! Filesystem-backed adapters.

mod assignees;

pub use assignees::FileAssigneeStore;
