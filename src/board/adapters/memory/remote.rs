//! In-memory task collection with live subscriptions and failure injection.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use tokio::sync::mpsc;

use crate::board::{
    domain::TaskId,
    ports::{
        RemoteDate, RemoteStoreError, RemoteStoreResult, RemoteTaskRecord, RemoteTaskStore,
        SubscriptionEvent, TaskFields, TaskSubscription, TaskUpdate,
    },
};

/// Remote calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// [`RemoteTaskStore::fetch_all`].
    FetchAll,
    /// [`RemoteTaskStore::create`].
    Create,
    /// [`RemoteTaskStore::update`].
    Update,
    /// [`RemoteTaskStore::delete`].
    Delete,
}

/// Thread-safe in-memory task collection.
///
/// Documents keep insertion order. Every successful write pushes a fresh
/// snapshot to all live subscriptions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteStore {
    state: Arc<RwLock<InMemoryRemoteState>>,
}

#[derive(Debug, Default)]
struct InMemoryRemoteState {
    documents: Vec<RemoteTaskRecord>,
    subscribers: Vec<mpsc::UnboundedSender<SubscriptionEvent>>,
    scheduled_failures: VecDeque<RemoteOperation>,
    offline: bool,
}

impl InMemoryRemoteState {
    /// Consumes a scheduled failure for `operation`, if one applies.
    fn check(&mut self, operation: RemoteOperation) -> RemoteStoreResult<()> {
        if self.offline {
            return Err(RemoteStoreError::Unavailable("store is offline".to_owned()));
        }
        if let Some(index) = self
            .scheduled_failures
            .iter()
            .position(|scheduled| *scheduled == operation)
        {
            self.scheduled_failures.remove(index);
            return Err(RemoteStoreError::Unavailable(format!(
                "injected {operation:?} failure"
            )));
        }
        Ok(())
    }

    fn broadcast(&mut self, event: &SubscriptionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    fn publish(&mut self) {
        let snapshot = Ok(self.documents.clone());
        self.broadcast(&snapshot);
    }

    fn document_mut(&mut self, id: &TaskId) -> RemoteStoreResult<&mut RemoteTaskRecord> {
        self.documents
            .iter_mut()
            .find(|record| record.id == *id)
            .ok_or_else(|| RemoteStoreError::NotFound(id.clone()))
    }
}

impl InMemoryRemoteStore {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding `records`.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = RemoteTaskRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.write() {
            state.documents.extend(records);
        }
        store
    }

    /// Returns a copy of every document.
    #[must_use]
    pub fn records(&self) -> Vec<RemoteTaskRecord> {
        self.state
            .read()
            .map(|state| state.documents.clone())
            .unwrap_or_default()
    }

    /// Makes the next call of `operation` fail once.
    pub fn fail_next(&self, operation: RemoteOperation) {
        if let Ok(mut state) = self.state.write() {
            state.scheduled_failures.push_back(operation);
        }
    }

    /// Makes every call fail while `offline` is set.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.write() {
            state.offline = offline;
        }
    }

    /// Sends `error` to every live subscription.
    pub fn push_subscription_error(&self, error: RemoteStoreError) {
        if let Ok(mut state) = self.state.write() {
            state.broadcast(&Err(error));
        }
    }

    /// Drops every live subscription, closing their feeds.
    pub fn close_subscriptions(&self) {
        if let Ok(mut state) = self.state.write() {
            state.subscribers.clear();
        }
    }

    fn write(&self) -> RemoteStoreResult<RwLockWriteGuard<'_, InMemoryRemoteState>> {
        self.state.write().map_err(|err| {
            RemoteStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl RemoteTaskStore for InMemoryRemoteStore {
    async fn fetch_all(&self) -> RemoteStoreResult<Vec<RemoteTaskRecord>> {
        let mut state = self.write()?;
        state.check(RemoteOperation::FetchAll)?;
        Ok(state.documents.clone())
    }

    async fn subscribe(&self) -> RemoteStoreResult<TaskSubscription> {
        let mut state = self.write()?;
        state.check(RemoteOperation::FetchAll)?;
        let (sender, subscription) = TaskSubscription::channel();
        if sender.send(Ok(state.documents.clone())).is_ok() {
            state.subscribers.push(sender);
        }
        Ok(subscription)
    }

    async fn create(&self, fields: &TaskFields) -> RemoteStoreResult<TaskId> {
        let mut state = self.write()?;
        state.check(RemoteOperation::Create)?;
        let id = TaskId::generate();
        state.documents.push(RemoteTaskRecord {
            id: id.clone(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            due_date: fields.due_date.map(RemoteDate::from_date),
            status: Some(fields.status.as_str().to_owned()),
            assignee: fields.assignee.clone(),
            created_at: Some(RemoteDate::from_date_time(fields.created_at)),
        });
        state.publish();
        Ok(id)
    }

    async fn update(&self, id: &TaskId, update: &TaskUpdate) -> RemoteStoreResult<()> {
        let mut state = self.write()?;
        state.check(RemoteOperation::Update)?;
        let record = state.document_mut(id)?;
        match update {
            TaskUpdate::Status(status) => {
                record.status = Some(status.as_str().to_owned());
            }
            TaskUpdate::Details(patch) => {
                record.title.clone_from(&patch.title);
                record.description.clone_from(&patch.description);
                record.due_date = patch.due_date.map(RemoteDate::from_date);
            }
        }
        state.publish();
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> RemoteStoreResult<()> {
        let mut state = self.write()?;
        state.check(RemoteOperation::Delete)?;
        let before = state.documents.len();
        state.documents.retain(|record| record.id != *id);
        if state.documents.len() == before {
            return Err(RemoteStoreError::NotFound(id.clone()));
        }
        state.publish();
        Ok(())
    }
}
