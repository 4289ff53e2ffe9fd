//! Board controller: turns user intents into optimistic store mutations and
//! reconciles them with the remote store.

use super::{BoardConfig, InFlightTracker, Selection, Snapshot, TaskStore, TaskStoreError, Ticket};
use crate::board::{
    domain::{
        AssigneeRegistry, DueDateUrgency, NewTask, Task, TaskId, TaskPatch, TaskStatus,
        ValidationError, today,
    },
    ports::{
        AdvisorError, AssigneeStore, AssigneeStoreError, BoardAction, DueDateAdvisor,
        DueDateSuggestion, Notification, Notifier, RemoteStoreError, RemoteTaskRecord,
        RemoteTaskStore, TaskFields, TaskSubscription, TaskUpdate,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Errors returned by board operations.
///
/// Validation, remote and assignee failures are also reported through the
/// [`Notifier`]. `NotFound` and `Unconfirmed` mean nothing was mutated and
/// are only logged.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Input was rejected before any mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The target task is not where the caller expected it.
    #[error(transparent)]
    NotFound(#[from] TaskStoreError),
    /// The remote store rejected the write; local state was reverted.
    #[error(transparent)]
    Remote(#[from] RemoteStoreError),
    /// The assignee registry could not be loaded or saved.
    #[error(transparent)]
    Assignees(#[from] AssigneeStoreError),
    /// The task was added locally and its remote create has not settled.
    #[error("task {0} is still being created")]
    Unconfirmed(TaskId),
    /// `confirm_delete` was called with nothing awaiting confirmation.
    #[error("no deletion awaiting confirmation")]
    NoPendingDeletion,
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// A delete that awaits user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    /// Task to delete.
    pub task_id: TaskId,
    /// Column the user deleted it from.
    pub column: TaskStatus,
}

#[derive(Debug, Default)]
struct BoardState {
    store: TaskStore,
    selection: Selection,
    pending_deletion: Option<PendingDeletion>,
    in_flight: InFlightTracker,
    provisional: HashSet<TaskId>,
    assignees: AssigneeRegistry,
}

impl BoardState {
    /// Refuses writes against a task whose create has not settled, since the
    /// remote store does not know its id yet.
    fn ensure_confirmed(&self, id: &TaskId) -> BoardResult<()> {
        if self.provisional.contains(id) {
            tracing::warn!(task_id = %id, "task is still being created");
            return Err(BoardError::Unconfirmed(id.clone()));
        }
        Ok(())
    }
}

/// Owns the board state for one session and coordinates it with the
/// remote collaborators.
///
/// Operations take `&self` so several can be in flight at once. Local
/// mutations happen synchronously before the remote call is issued; the
/// state lock is never held across an await.
pub struct BoardController<R, A, S, N, C>
where
    R: RemoteTaskStore,
    A: DueDateAdvisor,
    S: AssigneeStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    remote: Arc<R>,
    advisor: Arc<A>,
    assignee_store: Arc<S>,
    notifier: Arc<N>,
    clock: Arc<C>,
    config: BoardConfig,
    state: Mutex<BoardState>,
}

impl<R, A, S, N, C> BoardController<R, A, S, N, C>
where
    R: RemoteTaskStore,
    A: DueDateAdvisor,
    S: AssigneeStore,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a controller with an empty board and default settings.
    #[must_use]
    pub fn new(
        remote: Arc<R>,
        advisor: Arc<A>,
        assignee_store: Arc<S>,
        notifier: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            remote,
            advisor,
            assignee_store,
            notifier,
            clock,
            config: BoardConfig::default(),
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Replaces the board settings.
    #[must_use]
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the board settings.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ----- reads -----

    /// Returns a copy of the tasks in `status`, newest first.
    #[must_use]
    pub fn tasks(&self, status: TaskStatus) -> Vec<Task> {
        self.state().store.tasks(status).to_vec()
    }

    /// Returns a copy of the whole task store.
    #[must_use]
    pub fn store(&self) -> TaskStore {
        self.state().store.clone()
    }

    /// Returns the current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.state().selection.clone()
    }

    /// Returns the delete awaiting confirmation, if any.
    #[must_use]
    pub fn pending_deletion(&self) -> Option<PendingDeletion> {
        self.state().pending_deletion.clone()
    }

    /// Returns a copy of the assignee registry.
    #[must_use]
    pub fn assignees(&self) -> AssigneeRegistry {
        self.state().assignees.clone()
    }

    /// Classifies how close `task` is to its due date.
    #[must_use]
    pub fn urgency(&self, task: &Task) -> DueDateUrgency {
        DueDateUrgency::classify(
            task.due_date(),
            today(&*self.clock),
            self.config.due_soon_days,
        )
    }

    // ----- loading -----

    /// Reads every task from the remote store and replaces the board.
    ///
    /// Returns the number of tasks loaded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] when the read fails; the board keeps
    /// its last known state.
    pub async fn refresh(&self) -> BoardResult<usize> {
        match self.remote.fetch_all().await {
            Ok(records) => Ok(self.apply_remote_snapshot(records)),
            Err(err) => {
                tracing::error!(error = %err, "failed to load tasks");
                self.notifier.notify(Notification::LoadFailed(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Replaces the board with a whole-collection snapshot.
    ///
    /// Records with an unknown status are skipped. Returns the number of
    /// tasks loaded.
    pub fn apply_remote_snapshot(&self, records: Vec<RemoteTaskRecord>) -> usize {
        let tasks: Vec<Task> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match record.into_task() {
                    Ok(task) => Some(task),
                    Err(err) => {
                        tracing::warn!(
                            task_id = %id,
                            error = %err,
                            "skipping task with unknown status"
                        );
                        None
                    }
                }
            })
            .collect();
        let count = tasks.len();
        self.state().store.load(tasks);
        tracing::debug!(count, "board loaded from remote snapshot");
        count
    }

    /// Applies every event of a live subscription until the feed closes.
    ///
    /// Feed errors are reported and leave the board untouched; reconnecting
    /// is up to the remote store.
    pub async fn follow(&self, mut subscription: TaskSubscription) {
        while let Some(event) = subscription.next().await {
            match event {
                Ok(records) => {
                    self.apply_remote_snapshot(records);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "task subscription reported an error");
                    self.notifier
                        .notify(Notification::SubscriptionFailed(err.to_string()));
                }
            }
        }
        tracing::debug!("task subscription closed");
    }

    // ----- selection -----

    /// Toggles selection of a task in a column.
    pub fn select_task(&self, task_id: &TaskId, column: TaskStatus) {
        self.state().selection.click(task_id, column);
    }

    /// Collapses a column, clearing any selection inside it.
    pub fn collapse_column(&self, column: TaskStatus) {
        self.state().selection.collapse(column);
    }

    // ----- add -----

    /// Validates and adds a task to the pending column, then creates it
    /// remotely. On success the returned task carries the remote id and the
    /// caller may clear its input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] without touching the board, or
    /// [`BoardError::Remote`] after removing the optimistic task again.
    pub async fn add_task(&self, input: NewTask) -> BoardResult<Task> {
        self.add_validated(input, self.config.require_due_date).await
    }

    /// Adds a task, asking the advisor for a due date when none was given.
    ///
    /// The task is added whatever the advisor answers. A suggestion is used
    /// only when it parses and is not in the past.
    ///
    /// # Errors
    ///
    /// As [`Self::add_task`], except that a missing due date is accepted.
    pub async fn add_task_with_advice(&self, mut input: NewTask) -> BoardResult<Task> {
        if input.due_date.is_none() {
            input.due_date = self
                .suggest_due_date(&input.description)
                .await
                .and_then(|suggestion| suggestion.date())
                .filter(|date| *date >= today(&*self.clock));
        }
        self.add_validated(input, false).await
    }

    /// Asks the advisor for a due date for `description`.
    ///
    /// Failures are reported as an inline notification and yield `None`.
    pub async fn suggest_due_date(&self, description: &str) -> Option<DueDateSuggestion> {
        let outcome = self.advisor.suggest(description).await.and_then(|suggestion| {
            if suggestion.date().is_none() {
                return Err(AdvisorError::InvalidResponse(format!(
                    "unparseable date '{}'",
                    suggestion.suggested_date
                )));
            }
            Ok(suggestion)
        });
        match outcome {
            Ok(suggestion) => Some(suggestion),
            Err(err) => {
                tracing::warn!(error = %err, "due-date advice unavailable");
                self.notifier
                    .notify(Notification::AdviceUnavailable(err.to_string()));
                None
            }
        }
    }

    async fn add_validated(&self, input: NewTask, require_due_date: bool) -> BoardResult<Task> {
        let (task, ticket) = {
            let mut state = self.state();
            if let Err(err) = self.validate_new(&state, &input, require_due_date) {
                drop(state);
                return Err(self.reject(err));
            }
            let task = Task::create(TaskId::generate(), input, &*self.clock);
            state.store.add(task.clone());
            state.provisional.insert(task.id().clone());
            let ticket = state.in_flight.issue(task.id());
            (task, ticket)
        };
        tracing::debug!(task_id = %task.id(), title = task.title(), "optimistic add applied");

        let action = BoardAction::Add {
            title: task.title().to_owned(),
        };
        match self.remote.create(&TaskFields::from(&task)).await {
            Ok(remote_id) => {
                {
                    let mut state = self.state();
                    state.provisional.remove(task.id());
                    let rekeyed = state.in_flight.rekey(&ticket, &remote_id);
                    state.store.rekey(task.id(), remote_id.clone());
                    state.in_flight.settle(&rekeyed);
                }
                tracing::info!(task_id = %remote_id, "task created");
                self.notifier.notify(Notification::Confirmed(action));
                Ok(task.with_id(remote_id))
            }
            Err(err) => {
                {
                    let mut state = self.state();
                    state.provisional.remove(task.id());
                    if state.in_flight.settle(&ticket) {
                        state.store.remove(task.id());
                    }
                }
                Err(self.remote_failed(action, err))
            }
        }
    }

    fn validate_new(
        &self,
        state: &BoardState,
        input: &NewTask,
        require_due_date: bool,
    ) -> Result<(), ValidationError> {
        input.ensure_text_present()?;
        if require_due_date && input.due_date.is_none() {
            return Err(ValidationError::MissingDueDate);
        }
        if state.store.has_title(&input.title) {
            return Err(ValidationError::DuplicateTitle(input.title.clone()));
        }
        if let Some(date) = input.due_date {
            self.ensure_not_past(date)?;
        }
        if let Some(assignee) = input.assignee.as_deref() {
            if !state.assignees.contains(assignee) {
                return Err(ValidationError::UnknownAssignee(assignee.to_owned()));
            }
        }
        Ok(())
    }

    fn ensure_not_past(&self, date: NaiveDate) -> Result<(), ValidationError> {
        if self.config.reject_past_due_dates && date < today(&*self.clock) {
            return Err(ValidationError::PastDueDate(date));
        }
        Ok(())
    }

    // ----- move -----

    /// Moves a task between columns, then updates its status remotely.
    ///
    /// The selection is cleared once the local move happens, whatever the
    /// remote outcome.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Unconfirmed`] while the task's create is in
    /// flight, [`BoardError::NotFound`] when `from` does not hold the task,
    /// or [`BoardError::Remote`] after reverting the move.
    pub async fn move_task(&self, id: &TaskId, from: TaskStatus, to: TaskStatus) -> BoardResult<()> {
        let (snapshot, ticket) = {
            let mut state = self.state();
            state.ensure_confirmed(id)?;
            let snapshot = state.store.snapshot();
            if let Err(err) = state.store.move_task(id, from, to) {
                tracing::warn!(task_id = %id, %from, %to, "task to move not found");
                return Err(err.into());
            }
            state.selection.clear();
            (snapshot, state.in_flight.issue(id))
        };
        tracing::debug!(task_id = %id, %from, %to, "optimistic move applied");

        let action = BoardAction::Move {
            id: id.clone(),
            from,
            to,
        };
        let result = self.remote.update(id, &TaskUpdate::Status(to)).await;
        self.reconcile(&ticket, &snapshot, action, result)
    }

    // ----- delete -----

    /// Records a delete awaiting confirmation.
    pub fn request_delete(&self, task_id: &TaskId, column: TaskStatus) {
        self.state().pending_deletion = Some(PendingDeletion {
            task_id: task_id.clone(),
            column,
        });
    }

    /// Drops the delete awaiting confirmation.
    pub fn cancel_delete(&self) {
        self.state().pending_deletion = None;
    }

    /// Performs the delete awaiting confirmation. The confirmation is
    /// cleared whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoPendingDeletion`] when nothing awaits
    /// confirmation, otherwise as [`Self::delete_task`].
    pub async fn confirm_delete(&self) -> BoardResult<()> {
        let pending = self
            .state()
            .pending_deletion
            .take()
            .ok_or(BoardError::NoPendingDeletion)?;
        self.delete_task(&pending.task_id, pending.column).await
    }

    /// Removes a task from `from`, then deletes it remotely.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Unconfirmed`] while the task's create is in
    /// flight, [`BoardError::NotFound`] when `from` does not hold the task,
    /// or [`BoardError::Remote`] after restoring the task.
    pub async fn delete_task(&self, id: &TaskId, from: TaskStatus) -> BoardResult<()> {
        let (snapshot, ticket) = {
            let mut state = self.state();
            state.ensure_confirmed(id)?;
            let snapshot = state.store.snapshot();
            if let Err(err) = state.store.remove_from(id, from) {
                tracing::warn!(task_id = %id, %from, "task to delete not found");
                return Err(err.into());
            }
            state.selection.clear_if(id);
            (snapshot, state.in_flight.issue(id))
        };
        tracing::debug!(task_id = %id, %from, "optimistic delete applied");

        let action = BoardAction::Delete { id: id.clone() };
        let result = self.remote.delete(id).await;
        self.reconcile(&ticket, &snapshot, action, result)
    }

    // ----- edit -----

    /// Replaces a task's title, description and due date, then updates them
    /// remotely. Status, assignee and creation time never change.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`], [`BoardError::Unconfirmed`] or
    /// [`BoardError::NotFound`] without touching the board, or [`BoardError::Remote`] after restoring
    /// the previous values.
    pub async fn edit_task(&self, id: &TaskId, patch: TaskPatch) -> BoardResult<Task> {
        let (snapshot, ticket, edited) = {
            let mut state = self.state();
            state.ensure_confirmed(id)?;
            let Some(current) = state.store.find(id) else {
                tracing::warn!(task_id = %id, "task to edit not found");
                return Err(TaskStoreError::Unknown(id.clone()).into());
            };
            if let Err(err) = self.validate_patch(current, &patch) {
                drop(state);
                return Err(self.reject(err));
            }
            let snapshot = state.store.snapshot();
            let previous = state.store.edit(id, &patch)?;
            (snapshot, state.in_flight.issue(id), previous.with_patch(&patch))
        };
        tracing::debug!(task_id = %id, "optimistic edit applied");

        let action = BoardAction::Edit { id: id.clone() };
        let result = self.remote.update(id, &TaskUpdate::Details(patch)).await;
        self.reconcile(&ticket, &snapshot, action, result)?;
        Ok(edited)
    }

    fn validate_patch(&self, current: &Task, patch: &TaskPatch) -> Result<(), ValidationError> {
        patch.ensure_text_present()?;
        if self.config.require_due_date && patch.due_date.is_none() {
            return Err(ValidationError::MissingDueDate);
        }
        match patch.due_date {
            Some(date) if Some(date) != current.due_date() => self.ensure_not_past(date),
            _ => Ok(()),
        }
    }

    // ----- assignees -----

    /// Replaces the assignee registry with the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Assignees`] when the store cannot be read.
    pub async fn load_assignees(&self) -> BoardResult<()> {
        let registry = self.assignee_store.load().await.map_err(|err| {
            tracing::error!(error = %err, "failed to load assignees");
            self.notifier.notify(Notification::LoadFailed(err.to_string()));
            BoardError::from(err)
        })?;
        self.state().assignees = registry;
        Ok(())
    }

    /// Registers an assignee and persists the registry. Returns whether the
    /// registry changed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for blank names, or
    /// [`BoardError::Assignees`] after reverting the registry.
    pub async fn add_assignee(&self, name: &str) -> BoardResult<bool> {
        let outcome = {
            let mut state = self.state();
            let previous = state.assignees.clone();
            state
                .assignees
                .add(name)
                .map(|changed| (changed, previous, state.assignees.clone()))
        };
        let (changed, previous, updated) = outcome.map_err(|err| self.reject(err))?;
        if changed {
            self.persist_assignees(previous, &updated).await?;
        }
        Ok(changed)
    }

    /// Unregisters an assignee and persists the registry. Tasks already
    /// assigned to the name keep it. Returns whether the registry changed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Assignees`] after reverting the registry.
    pub async fn remove_assignee(&self, name: &str) -> BoardResult<bool> {
        let (changed, previous, updated) = {
            let mut state = self.state();
            let previous = state.assignees.clone();
            let changed = state.assignees.remove(name);
            (changed, previous, state.assignees.clone())
        };
        if changed {
            self.persist_assignees(previous, &updated).await?;
        }
        Ok(changed)
    }

    async fn persist_assignees(
        &self,
        previous: AssigneeRegistry,
        updated: &AssigneeRegistry,
    ) -> BoardResult<()> {
        match self.assignee_store.save(updated).await {
            Ok(()) => {
                self.notifier
                    .notify(Notification::Confirmed(BoardAction::SaveAssignees));
                Ok(())
            }
            Err(err) => {
                {
                    let mut state = self.state();
                    if state.assignees == *updated {
                        state.assignees = previous;
                    }
                }
                tracing::error!(error = %err, "failed to save assignees");
                self.notifier.notify(Notification::Failed {
                    action: BoardAction::SaveAssignees,
                    reason: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    // ----- reconciliation -----

    /// Settles a remote write. Failures revert the task to `snapshot` unless
    /// a newer write for the same task has been issued since.
    fn reconcile(
        &self,
        ticket: &Ticket,
        snapshot: &Snapshot,
        action: BoardAction,
        result: Result<(), RemoteStoreError>,
    ) -> BoardResult<()> {
        let current = {
            let mut state = self.state();
            let current = state.in_flight.settle(ticket);
            if current && result.is_err() {
                state.store.revert(ticket.task_id(), snapshot);
            }
            current
        };
        if !current {
            tracing::debug!(
                task_id = %ticket.task_id(),
                sequence = ticket.sequence(),
                "discarding stale confirmation"
            );
        }
        match result {
            Ok(()) => {
                tracing::info!(
                    task_id = %ticket.task_id(),
                    action = ?action,
                    "remote write confirmed"
                );
                self.notifier.notify(Notification::Confirmed(action));
                Ok(())
            }
            Err(err) => Err(self.remote_failed(action, err)),
        }
    }

    fn remote_failed(&self, action: BoardAction, err: RemoteStoreError) -> BoardError {
        tracing::error!(action = ?action, error = %err, "remote write failed");
        self.notifier.notify(Notification::Failed {
            action,
            reason: err.to_string(),
        });
        err.into()
    }

    fn reject(&self, err: ValidationError) -> BoardError {
        tracing::debug!(error = %err, "input rejected");
        self.notifier.notify(Notification::Rejected(err.clone()));
        err.into()
    }
}
