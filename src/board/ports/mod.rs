//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod advisor;
pub mod assignees;
pub mod notifier;
pub mod remote;

pub use advisor::{AdvisorError, AdvisorResult, DueDateAdvisor, DueDateSuggestion};
pub use assignees::{AssigneeStore, AssigneeStoreError, AssigneeStoreResult};
pub use notifier::{BoardAction, Notification, Notifier};
pub use remote::{
    RemoteDate, RemoteStoreError, RemoteStoreResult, RemoteTaskRecord, RemoteTaskStore,
    SubscriptionEvent, TaskFields, TaskSubscription, TaskUpdate,
};
