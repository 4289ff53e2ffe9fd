//! Remote document store port and its wire types.

use crate::board::domain::{
    ParseTaskStatusError, PersistedTaskData, Task, TaskId, TaskPatch, TaskStatus, parse_iso_date,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Result type for remote store operations.
pub type RemoteStoreResult<T> = Result<T, RemoteStoreError>;

/// Document collection holding the board's tasks.
#[async_trait]
pub trait RemoteTaskStore: Send + Sync {
    /// Reads every task document once.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError`] when the collection cannot be read.
    async fn fetch_all(&self) -> RemoteStoreResult<Vec<RemoteTaskRecord>>;

    /// Opens a live feed of whole-collection snapshots.
    ///
    /// The first event carries the current contents. Dropping the returned
    /// subscription unsubscribes.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError`] when the feed cannot be opened.
    async fn subscribe(&self) -> RemoteStoreResult<TaskSubscription>;

    /// Creates a document and returns its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError`] when the write is rejected.
    async fn create(&self, fields: &TaskFields) -> RemoteStoreResult<TaskId>;

    /// Applies a partial update to one document.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::NotFound`] when the document does not
    /// exist, or another variant when the write is rejected.
    async fn update(&self, id: &TaskId, update: &TaskUpdate) -> RemoteStoreResult<()>;

    /// Deletes one document.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError`] when the delete is rejected.
    async fn delete(&self, id: &TaskId) -> RemoteStoreResult<()>;
}

/// Errors returned by remote store implementations.
#[derive(Debug, Clone, Error)]
pub enum RemoteStoreError {
    /// The document does not exist.
    #[error("task document not found: {0}")]
    NotFound(TaskId),

    /// The store could not be reached or refused the call.
    #[error("remote store unavailable: {0}")]
    Unavailable(String),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RemoteStoreError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// A date as stored remotely: a native timestamp, text, or some other
/// shape that decodes as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteDate {
    /// Store-native timestamp, as written by client or admin SDKs.
    Timestamp {
        /// Seconds since the Unix epoch.
        #[serde(alias = "_seconds")]
        seconds: i64,
        /// Sub-second nanoseconds.
        #[serde(alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// ISO-8601 date or RFC 3339 date-time text.
    Text(String),
    /// Any other value; kept so one bad field does not fail the document.
    Other(serde_json::Value),
}

impl RemoteDate {
    /// Encodes an instant as a native timestamp.
    #[must_use]
    pub fn from_date_time(value: DateTime<Utc>) -> Self {
        Self::Timestamp {
            seconds: value.timestamp(),
            nanoseconds: value.timestamp_subsec_nanos(),
        }
    }

    /// Encodes a calendar date as ISO-8601 text.
    #[must_use]
    pub fn from_date(value: NaiveDate) -> Self {
        Self::Text(value.format("%Y-%m-%d").to_string())
    }

    /// Decodes an instant. Plain dates resolve to midnight UTC.
    #[must_use]
    pub fn to_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            Self::Text(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|value| value.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    parse_iso_date(raw)
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                        .map(|naive| naive.and_utc())
                }),
            Self::Other(_) => None,
        }
    }

    /// Decodes a calendar date, or `None` when the value is unparseable.
    #[must_use]
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Timestamp { .. } => self.to_date_time().map(|value| value.date_naive()),
            Self::Text(raw) => parse_iso_date(raw),
            Self::Other(_) => None,
        }
    }
}

/// A task document as read from the store.
///
/// Every field but the identifier is tolerated as missing, since older
/// documents were written with fewer fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTaskRecord {
    /// Document identifier.
    pub id: TaskId,
    /// Title text.
    #[serde(default)]
    pub title: String,
    /// Description text.
    #[serde(default)]
    pub description: String,
    /// Due date in either wire representation.
    #[serde(default)]
    pub due_date: Option<RemoteDate>,
    /// Status label.
    #[serde(default)]
    pub status: Option<String>,
    /// Assignee name.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Creation time in either wire representation.
    #[serde(default)]
    pub created_at: Option<RemoteDate>,
}

impl RemoteTaskRecord {
    /// Builds the record the store would hold for `task`.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().clone(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date().map(RemoteDate::from_date),
            status: Some(task.status().as_str().to_owned()),
            assignee: task.assignee().map(str::to_owned),
            created_at: Some(RemoteDate::from_date_time(task.created_at())),
        }
    }

    /// Normalizes the record into a domain task.
    ///
    /// A missing status reads as [`TaskStatus::Pending`]. Unparseable dates
    /// read as absent; a missing creation time reads as the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskStatusError`] when the status label is unknown.
    pub fn into_task(self) -> Result<Task, ParseTaskStatusError> {
        let status = match self.status.as_deref() {
            Some(label) => TaskStatus::try_from(label)?,
            None => TaskStatus::Pending,
        };
        let due_date = self.due_date.as_ref().and_then(|raw| {
            let parsed = raw.to_naive_date();
            if parsed.is_none() {
                tracing::warn!(
                    task_id = %self.id,
                    value = ?raw,
                    "unparseable due date, treating as absent"
                );
            }
            parsed
        });
        let created_at = self
            .created_at
            .as_ref()
            .and_then(|raw| {
                let parsed = raw.to_date_time();
                if parsed.is_none() {
                    tracing::warn!(
                        task_id = %self.id,
                        value = ?raw,
                        "unparseable creation time, using the epoch"
                    );
                }
                parsed
            })
            .unwrap_or(DateTime::UNIX_EPOCH);

        Ok(Task::from_persisted(PersistedTaskData {
            id: self.id,
            title: self.title,
            description: self.description,
            due_date,
            status,
            assignee: self.assignee,
            created_at,
        }))
    }
}

/// Field set written when creating a task document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Initial status.
    pub status: TaskStatus,
    /// Assignee, if any.
    pub assignee: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskFields {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date(),
            status: task.status(),
            assignee: task.assignee().map(str::to_owned),
            created_at: task.created_at(),
        }
    }
}

/// Partial update sent for an existing document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskUpdate {
    /// Overwrite only the status field.
    Status(TaskStatus),
    /// Overwrite only the editable fields.
    Details(TaskPatch),
}

/// One event on a live subscription.
pub type SubscriptionEvent = Result<Vec<RemoteTaskRecord>, RemoteStoreError>;

/// Receiving half of a live collection feed.
#[derive(Debug)]
pub struct TaskSubscription {
    receiver: mpsc::UnboundedReceiver<SubscriptionEvent>,
}

impl TaskSubscription {
    /// Creates a connected sender and subscription pair.
    #[must_use]
    pub fn channel() -> (mpsc::UnboundedSender<SubscriptionEvent>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self { receiver })
    }

    /// Waits for the next event. Returns `None` once the feed has closed.
    pub async fn next(&mut self) -> Option<SubscriptionEvent> {
        self.receiver.recv().await
    }
}
