//! Server-side task query filter.

use super::{Task, TaskPriority, TaskStatus};
use crate::profile::domain::UserId;

/// Recognised task list filters.
///
/// Each present field narrows the query by equality; an empty filter selects
/// every task visible to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks with this status.
    pub status: Option<TaskStatus>,
    /// Only tasks with this priority.
    pub priority: Option<TaskPriority>,
    /// Only tasks assigned to this user.
    pub assigned_to: Option<UserId>,
}

impl TaskFilter {
    /// Creates an empty filter.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            status: None,
            priority: None,
            assigned_to: None,
        }
    }

    /// Narrows by status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Narrows by priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Narrows by assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Returns `true` when no field narrows the query.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.assigned_to.is_none()
    }

    /// Evaluates the filter locally.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.assigned_to.is_none_or(|user| task.is_assigned_to(user))
    }
}
