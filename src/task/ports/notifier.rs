//! Notification port for task change events.

use crate::task::domain::Task;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Task change announced to the team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    /// A task was created.
    Created(Task),
    /// Status or priority of a task changed.
    Updated(Task),
    /// A task was assigned to a user.
    Assigned(Task),
}

impl TaskEvent {
    /// Returns the task the event is about.
    #[must_use]
    pub const fn task(&self) -> &Task {
        match self {
            Self::Created(task) | Self::Updated(task) | Self::Assigned(task) => task,
        }
    }

    /// Returns a stable lowercase label for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created(_) => "task_create",
            Self::Updated(_) => "task_update",
            Self::Assigned(_) => "task_assign",
        }
    }
}

/// Out-of-band delivery of task change events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskNotifier: Send + Sync {
    /// Delivers one event.
    async fn notify(&self, event: &TaskEvent) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The message template could not be rendered.
    #[error("failed to render notification: {0}")]
    Render(String),

    /// The message could not be delivered.
    #[error("failed to deliver notification: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a delivery failure.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
