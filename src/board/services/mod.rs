//! Application services for the task board.

mod config;
mod controller;
mod selection;
mod sequence;
mod store;

pub use config::BoardConfig;
pub use controller::{BoardController, BoardError, BoardResult, PendingDeletion};
pub use selection::Selection;
pub use sequence::{InFlightTracker, Ticket};
pub use store::{Snapshot, TaskStore, TaskStoreError};
