//! Persistence port for the assignee registry.

use crate::board::domain::AssigneeRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for assignee store operations.
pub type AssigneeStoreResult<T> = Result<T, AssigneeStoreError>;

/// Stores the registry as one document.
#[async_trait]
pub trait AssigneeStore: Send + Sync {
    /// Loads the registry. A store with no document yields an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`AssigneeStoreError`] when the document cannot be read.
    async fn load(&self) -> AssigneeStoreResult<AssigneeRegistry>;

    /// Replaces the stored document with `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`AssigneeStoreError`] when the document cannot be written.
    async fn save(&self, registry: &AssigneeRegistry) -> AssigneeStoreResult<()>;
}

/// Errors returned by assignee store implementations.
#[derive(Debug, Clone, Error)]
pub enum AssigneeStoreError {
    /// The stored document is malformed.
    #[error("malformed assignee document: {0}")]
    Malformed(String),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssigneeStoreError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
