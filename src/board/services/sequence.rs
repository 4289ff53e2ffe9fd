//! Last-writer-wins guard for in-flight remote writes.

use crate::board::domain::TaskId;
use std::collections::HashMap;

/// Tag attached to one in-flight remote write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    task_id: TaskId,
    sequence: u64,
}

impl Ticket {
    /// Returns the task the write targets.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the write's sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Tracks the latest write issued per task.
///
/// Sequence numbers are monotonic across all tasks. A confirmation or
/// rollback is applied only when its ticket is still the latest for its
/// task.
#[derive(Debug, Default)]
pub struct InFlightTracker {
    next_sequence: u64,
    latest: HashMap<TaskId, u64>,
}

impl InFlightTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new write against `task_id`, superseding any
    /// earlier ticket for that task.
    pub fn issue(&mut self, task_id: &TaskId) -> Ticket {
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.latest.insert(task_id.clone(), self.next_sequence);
        Ticket {
            task_id: task_id.clone(),
            sequence: self.next_sequence,
        }
    }

    /// Returns `true` when `ticket` is the latest for its task.
    #[must_use]
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.task_id) == Some(&ticket.sequence)
    }

    /// Retires `ticket`. Returns whether it was still current; stale tickets
    /// leave the newer entry in place.
    pub fn settle(&mut self, ticket: &Ticket) -> bool {
        let current = self.is_current(ticket);
        if current {
            self.latest.remove(&ticket.task_id);
        }
        current
    }

    /// Moves tracking from `old` to `new` after the store assigns an id.
    /// Returns the re-tagged ticket.
    pub fn rekey(&mut self, ticket: &Ticket, new: &TaskId) -> Ticket {
        if let Some(sequence) = self.latest.remove(&ticket.task_id) {
            self.latest.insert(new.clone(), sequence);
        }
        Ticket {
            task_id: new.clone(),
            sequence: ticket.sequence,
        }
    }

    /// Returns the number of tasks with a write in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.latest.len()
    }
}
