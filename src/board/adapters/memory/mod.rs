//! In-memory adapters for tests and offline sessions.

mod advisor;
mod assignees;
mod notifier;
mod remote;

pub use advisor::FixedDueDateAdvisor;
pub use assignees::InMemoryAssigneeStore;
pub use notifier::RecordingNotifier;
pub use remote::{InMemoryRemoteStore, RemoteOperation};
