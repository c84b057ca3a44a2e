//! Board state container with server-confirmed status changes.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::board::domain::{BoardGrouping, DropOutcome};
use crate::failure::FailureKind;
use crate::task::{
    domain::{Task, TaskFilter, TaskId, TaskStatus},
    ports::{TaskGateway, TaskGatewayError},
};

/// Errors returned by board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The task is not on the board.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),

    /// Gateway operation failed.
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),
}

impl BoardError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::UnknownTask(_) => FailureKind::NotFound,
            Self::Gateway(err) => err.kind(),
        }
    }
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Result of a status change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChangeOutcome {
    /// Nothing needed to change; no backend call was made.
    Unchanged,
    /// The backend confirmed the change and the board now shows this record.
    Moved(Task),
}

/// A status change that has been requested but not yet sent.
///
/// Resolving it does not borrow the board, so changes to different tasks may
/// be in flight together. Dropping it unresolved leaves the board untouched.
#[must_use = "a pending status change does nothing until resolved"]
pub struct PendingStatusChange<G: ?Sized> {
    gateway: Arc<G>,
    task_id: TaskId,
    from: TaskStatus,
    to: TaskStatus,
}

impl<G> PendingStatusChange<G>
where
    G: TaskGateway + ?Sized,
{
    /// Returns the task being moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status the task had when the change was requested.
    #[must_use]
    pub const fn from(&self) -> TaskStatus {
        self.from
    }

    /// Returns the requested status.
    #[must_use]
    pub const fn to(&self) -> TaskStatus {
        self.to
    }

    /// Sends the change and returns the confirmed record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the backend call fails.
    pub async fn resolve(self) -> BoardResult<Task> {
        match self.gateway.update_status(self.task_id, self.to).await {
            Ok(task) => Ok(task),
            Err(err) => {
                warn!(
                    task_id = %self.task_id,
                    from = %self.from,
                    to = %self.to,
                    error = %err,
                    "status change failed; board left unchanged"
                );
                Err(err.into())
            }
        }
    }
}

/// Board state container.
///
/// Owns the grouping exclusively. The grouping only changes on a successful
/// [`KanbanBoard::load`] or when a backend-confirmed record is committed.
pub struct KanbanBoard<G: ?Sized> {
    gateway: Arc<G>,
    grouping: BoardGrouping,
}

impl<G> KanbanBoard<G>
where
    G: TaskGateway + ?Sized,
{
    /// Creates an empty board over `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            grouping: BoardGrouping::new(),
        }
    }

    /// Returns the current grouping.
    #[must_use]
    pub const fn grouping(&self) -> &BoardGrouping {
        &self.grouping
    }

    /// Replaces the grouping with the full visible task set.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the tasks cannot be loaded; the
    /// previous grouping is kept.
    pub async fn load(&mut self) -> BoardResult<&BoardGrouping> {
        match self.gateway.list_tasks(TaskFilter::all()).await {
            Ok(tasks) => {
                self.grouping = BoardGrouping::from_tasks(tasks);
                info!(tasks = self.grouping.len(), "board loaded");
                Ok(&self.grouping)
            }
            Err(err) => {
                warn!(error = %err, "board load failed; keeping previous state");
                Err(err.into())
            }
        }
    }

    /// Prepares a status change for `task_id`.
    ///
    /// Returns `None` when the task already has `status`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board.
    pub fn begin_status_change(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> BoardResult<Option<PendingStatusChange<G>>> {
        let from = self
            .grouping
            .status_of(task_id)
            .ok_or(BoardError::UnknownTask(task_id))?;
        if from == status {
            return Ok(None);
        }
        Ok(Some(PendingStatusChange {
            gateway: Arc::clone(&self.gateway),
            task_id,
            from,
            to: status,
        }))
    }

    /// Stores a backend-confirmed record and returns the stored copy.
    ///
    /// Profile summaries missing from `task` are kept from the record it
    /// replaces when the referenced users are unchanged.
    pub fn commit(&mut self, mut task: Task) -> Task {
        if let Some(previous) = self.grouping.find(task.id()) {
            task.inherit_summaries(previous);
        }
        self.grouping.upsert(task.clone());
        task
    }

    /// Changes the status of a task once the backend confirms it.
    ///
    /// With a notifying gateway the call also waits for the change
    /// notification, bounded by the webhook timeout, after the backend has
    /// already confirmed the write.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board
    /// and [`BoardError::Gateway`] when the backend call fails. The grouping
    /// is unchanged on error.
    pub async fn apply_status_change(
        &mut self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> BoardResult<StatusChangeOutcome> {
        let Some(pending) = self.begin_status_change(task_id, status)? else {
            return Ok(StatusChangeOutcome::Unchanged);
        };
        let from = pending.from();
        let confirmed = pending.resolve().await?;
        let task = self.commit(confirmed);
        info!(task_id = %task_id, from = %from, to = %task.status(), "task moved");
        Ok(StatusChangeOutcome::Moved(task))
    }

    /// Routes the outcome of a drag gesture into a status change.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`KanbanBoard::apply_status_change`].
    pub async fn handle_drop(&mut self, outcome: DropOutcome) -> BoardResult<StatusChangeOutcome> {
        match outcome.move_request() {
            Some(request) => self.apply_status_change(request.task_id, request.to).await,
            None => Ok(StatusChangeOutcome::Unchanged),
        }
    }
}
