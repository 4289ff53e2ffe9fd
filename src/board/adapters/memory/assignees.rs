//! In-memory assignee registry document.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::AssigneeRegistry,
    ports::{AssigneeStore, AssigneeStoreError, AssigneeStoreResult},
};

/// Thread-safe in-memory assignee document.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssigneeStore {
    state: Arc<RwLock<InMemoryAssigneeState>>,
}

#[derive(Debug, Default)]
struct InMemoryAssigneeState {
    document: AssigneeRegistry,
    reject_writes: bool,
}

impl InMemoryAssigneeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `names`.
    #[must_use]
    pub fn with_names(names: impl IntoIterator<Item = String>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.write() {
            state.document = AssigneeRegistry::from_names(names);
        }
        store
    }

    /// Makes every save fail while `reject` is set.
    pub fn reject_writes(&self, reject: bool) {
        if let Ok(mut state) = self.state.write() {
            state.reject_writes = reject;
        }
    }

    /// Returns a copy of the stored document.
    #[must_use]
    pub fn document(&self) -> AssigneeRegistry {
        self.state
            .read()
            .map(|state| state.document.clone())
            .unwrap_or_default()
    }
}

fn lock_error(err: impl ToString) -> AssigneeStoreError {
    AssigneeStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AssigneeStore for InMemoryAssigneeStore {
    async fn load(&self) -> AssigneeStoreResult<AssigneeRegistry> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.document.clone())
    }

    async fn save(&self, registry: &AssigneeRegistry) -> AssigneeStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.reject_writes {
            return Err(AssigneeStoreError::persistence(std::io::Error::other(
                "assignee writes rejected",
            )));
        }
        state.document = registry.clone();
        Ok(())
    }
}
