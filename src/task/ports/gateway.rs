//! Gateway port for backend-owned task records.

use crate::failure::FailureKind;
use crate::task::domain::{NewTask, Task, TaskFilter, TaskId, TaskPatch, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task gateway operations.
pub type TaskGatewayResult<T> = Result<T, TaskGatewayError>;

/// Access contract for the task table of the hosted backend.
///
/// Every mutating call either applies completely and returns the full
/// updated record, or changes nothing and returns an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Lists tasks matching `filter`, ordered by due date ascending with
    /// undated tasks last.
    async fn list_tasks(&self, filter: TaskFilter) -> TaskGatewayResult<Vec<Task>>;

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the task does not exist or
    /// is not visible to the session.
    async fn find_task(&self, id: TaskId) -> TaskGatewayResult<Task>;

    /// Inserts a task and returns the stored record.
    async fn create_task(&self, task: &NewTask) -> TaskGatewayResult<Task>;

    /// Applies a partial update and returns the full updated record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the task does not exist.
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskGatewayResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, id: TaskId) -> TaskGatewayResult<()>;

    /// Changes only the status of a task.
    ///
    /// Issuing the status a task already has is a no-op that still returns
    /// the record.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskGatewayResult<Task> {
        self.update_task(id, &TaskPatch::status_change(status)).await
    }
}

/// Errors returned by task gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskGatewayError {
    /// The task does not exist or is not visible to the session.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backend rejected the payload or the session lacks permission.
    #[error("task change rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached or refused the session.
    #[error("task backend unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskGatewayError {
    /// Wraps a transport or authentication failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Rejected(_) => FailureKind::Validation,
            Self::Unavailable(_) => FailureKind::NetworkOrAuth,
        }
    }
}
