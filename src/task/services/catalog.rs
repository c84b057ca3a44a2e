//! Task list, detail and authoring operations.

use chrono::{DateTime, Utc};
use std::{num::NonZeroUsize, sync::Arc};
use thiserror::Error;
use tracing::info;

use crate::failure::FailureKind;
use crate::profile::domain::{UserId, UserSession};
use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskFilter, TaskId, TaskPatch, TaskPriority, TaskStatus},
    ports::{TaskGateway, TaskGatewayError},
};

/// List view query: server-side filters plus client-side search and limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    filter: TaskFilter,
    search: Option<String>,
    limit: Option<NonZeroUsize>,
}

impl TaskQuery {
    /// Creates a query selecting every visible task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies server-side equality filters.
    #[must_use]
    pub const fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Keeps tasks whose title or description contains `needle`, ignoring
    /// case. Blank needles are ignored.
    #[must_use]
    pub fn with_search(mut self, needle: impl Into<String>) -> Self {
        let value = needle.into();
        self.search = (!value.trim().is_empty()).then_some(value);
        self
    }

    /// Truncates the result to at most `limit` tasks. A limit of zero
    /// leaves the result untruncated.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = NonZeroUsize::new(limit);
        self
    }

    /// Returns the server-side filter.
    #[must_use]
    pub const fn filter(&self) -> TaskFilter {
        self.filter
    }
}

/// Fields of a task authored by a team leader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request in the To-Do column with medium priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
            assigned_to: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Assigns the task.
    #[must_use]
    pub const fn with_assignee(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }

    fn into_new_task(self, created_by: UserId) -> Result<NewTask, TaskDomainError> {
        let mut task = NewTask::new(self.title, created_by)?
            .with_description(self.description)
            .with_status(self.status)
            .with_priority(self.priority);
        if let Some(due_date) = self.due_date {
            task = task.with_due_date(due_date);
        }
        if let Some(user) = self.assigned_to {
            task = task.with_assignee(user);
        }
        Ok(task)
    }
}

/// Service-level errors for catalog operations.
#[derive(Debug, Error)]
pub enum TaskCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The session may not perform the operation.
    #[error("only team leaders may {0}")]
    Forbidden(&'static str),

    /// Gateway operation failed.
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),
}

impl TaskCatalogError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) | Self::Forbidden(_) => FailureKind::Validation,
            Self::Gateway(err) => err.kind(),
        }
    }
}

/// Result type for catalog operations.
pub type TaskCatalogResult<T> = Result<T, TaskCatalogError>;

/// Task catalog backing the list and detail views.
#[derive(Clone)]
pub struct TaskCatalogService<G>
where
    G: TaskGateway + ?Sized,
{
    gateway: Arc<G>,
}

impl<G> TaskCatalogService<G>
where
    G: TaskGateway + ?Sized,
{
    /// Creates a catalog over `gateway`.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists tasks for the list view.
    ///
    /// Search and limit are applied after the server-side filter and keep
    /// the server order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Gateway`] when the task list cannot be
    /// loaded.
    pub async fn list(&self, query: TaskQuery) -> TaskCatalogResult<Vec<Task>> {
        let tasks = self.gateway.list_tasks(query.filter).await?;
        let needle = query.search;
        let matching = tasks
            .into_iter()
            .filter(|task| needle.as_deref().is_none_or(|text| task.matches_search(text)));
        Ok(match query.limit {
            Some(limit) => matching.take(limit.get()).collect(),
            None => matching.collect(),
        })
    }

    /// Lists the tasks assigned to the session user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Gateway`] when the task list cannot be
    /// loaded.
    pub async fn assigned_to(&self, session: &UserSession) -> TaskCatalogResult<Vec<Task>> {
        let filter = TaskFilter::all().with_assignee(session.user_id());
        Ok(self.gateway.list_tasks(filter).await?)
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Gateway`] when the task is missing or the
    /// backend is unreachable.
    pub async fn get(&self, id: TaskId) -> TaskCatalogResult<Task> {
        Ok(self.gateway.find_task(id).await?)
    }

    /// Applies a partial update on behalf of `session`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyPatch`] when the patch changes nothing,
    /// or [`TaskCatalogError::Gateway`] when the update fails.
    pub async fn update(
        &self,
        session: &UserSession,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskCatalogResult<Task> {
        if patch.is_empty() {
            return Err(TaskDomainError::EmptyPatch.into());
        }
        let task = self.gateway.update_task(id, &patch).await?;
        info!(task_id = %id, actor = %session.user_id(), "task updated");
        Ok(task)
    }

    /// Creates a task authored by the session user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Forbidden`] for non-leaders,
    /// [`TaskDomainError::EmptyTitle`] for a blank title, or
    /// [`TaskCatalogError::Gateway`] when the insert fails.
    pub async fn create(
        &self,
        session: &UserSession,
        request: CreateTaskRequest,
    ) -> TaskCatalogResult<Task> {
        ensure_leader(session, "create tasks")?;
        let new_task = request.into_new_task(session.user_id())?;
        let task = self.gateway.create_task(&new_task).await?;
        info!(task_id = %task.id(), actor = %session.user_id(), "task created");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Forbidden`] for non-leaders or
    /// [`TaskCatalogError::Gateway`] when the delete fails.
    pub async fn delete(&self, session: &UserSession, id: TaskId) -> TaskCatalogResult<()> {
        ensure_leader(session, "delete tasks")?;
        self.gateway.delete_task(id).await?;
        info!(task_id = %id, actor = %session.user_id(), "task deleted");
        Ok(())
    }
}

fn ensure_leader(session: &UserSession, action: &'static str) -> TaskCatalogResult<()> {
    if session.is_team_leader() {
        Ok(())
    } else {
        Err(TaskCatalogError::Forbidden(action))
    }
}
