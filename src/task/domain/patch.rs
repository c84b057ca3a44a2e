//! Insert and partial-update payloads.

use super::{TaskDomainError, TaskPriority, TaskStatus};
use crate::profile::domain::UserId;
use chrono::{DateTime, Utc};

/// Validated payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<UserId>,
    created_by: UserId,
}

impl NewTask {
    /// Creates a to-do task of medium priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>, created_by: UserId) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: non_blank_title(title.into())?,
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
            assigned_to: None,
            created_by,
        })
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

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }
}

/// Partial update of a task. Absent fields are left untouched.
///
/// `due_date` and `assigned_to` are doubly optional: `Some(None)` clears the
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: Option<Option<DateTime<Utc>>>,
    assigned_to: Option<Option<UserId>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch that only changes the status.
    #[must_use]
    pub fn status_change(status: TaskStatus) -> Self {
        Self::new().with_status(status)
    }

    /// Changes the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, TaskDomainError> {
        self.title = Some(non_blank_title(title.into())?);
        Ok(self)
    }

    /// Changes the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Changes the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Changes the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Assigns or unassigns the task.
    #[must_use]
    pub const fn with_assignee(mut self, user: Option<UserId>) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Returns the new title, if changed.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the new description, if changed.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new status, if changed.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the new priority, if changed.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the new due date, if changed.
    #[must_use]
    pub const fn due_date(&self) -> Option<Option<DateTime<Utc>>> {
        self.due_date
    }

    /// Returns the new assignee, if changed.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<Option<UserId>> {
        self.assigned_to
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.assigned_to.is_none()
    }

    /// Returns `true` when the patch touches a field the team is notified
    /// about: status, priority, or assignment.
    #[must_use]
    pub const fn touches_tracked_fields(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || self.assigned_to.is_some()
    }
}

fn non_blank_title(title: String) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
