//! Task record and derived predicates.

use super::{NewTask, TaskId, TaskPatch, TaskPriority, TaskStatus};
use crate::profile::domain::{ProfileSummary, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Client-side copy of a task owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<UserId>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    assignee: Option<ProfileSummary>,
    creator: Option<ProfileSummary>,
}

/// Parameter object for reconstructing a task from a backend record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Assigned user, if any.
    pub assigned_to: Option<UserId>,
    /// User who created the task.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Nested summary of the assigned user.
    pub assignee: Option<ProfileSummary>,
    /// Nested summary of the creator.
    pub creator: Option<ProfileSummary>,
}

impl Task {
    /// Reconstructs a task from a backend record.
    #[must_use]
    pub fn from_record(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            status: record.status,
            priority: record.priority,
            due_date: record.due_date,
            assigned_to: record.assigned_to,
            created_by: record.created_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
            assignee: record.assignee,
            creator: record.creator,
        }
    }

    /// Materialises a new task the way the backend does on insert.
    #[must_use]
    pub fn create(new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: new_task.title().to_owned(),
            description: new_task.description().to_owned(),
            status: new_task.status(),
            priority: new_task.priority(),
            due_date: new_task.due_date(),
            assigned_to: new_task.assigned_to(),
            created_by: new_task.created_by(),
            created_at: timestamp,
            updated_at: timestamp,
            assignee: None,
            creator: None,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
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

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the nested assignee summary, if the backend supplied one.
    #[must_use]
    pub const fn assignee(&self) -> Option<&ProfileSummary> {
        self.assignee.as_ref()
    }

    /// Returns the nested creator summary, if the backend supplied one.
    #[must_use]
    pub const fn creator(&self) -> Option<&ProfileSummary> {
        self.creator.as_ref()
    }

    /// Returns `true` when the due date has passed and the task is not done.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < now)
    }

    /// Returns `true` when the task is assigned to `user`.
    #[must_use]
    pub fn is_assigned_to(&self, user: UserId) -> bool {
        self.assigned_to == Some(user)
    }

    /// Case-insensitive substring match on title or description.
    ///
    /// A blank needle matches every task.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let query = needle.trim().to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Applies a partial update and returns whether any field changed.
    ///
    /// The update timestamp only moves when something changed, so applying
    /// the same patch twice leaves the second application without effect.
    pub fn apply(&mut self, patch: &TaskPatch, clock: &impl Clock) -> bool {
        let mut changed = false;
        changed |= replace_if_different(&mut self.title, patch.title().map(str::to_owned));
        changed |= replace_if_different(
            &mut self.description,
            patch.description().map(str::to_owned),
        );
        changed |= replace_if_different(&mut self.status, patch.status());
        changed |= replace_if_different(&mut self.priority, patch.priority());
        changed |= replace_if_different(&mut self.due_date, patch.due_date());
        if replace_if_different(&mut self.assigned_to, patch.assigned_to()) {
            changed = true;
            let still_matches = self
                .assignee
                .as_ref()
                .is_some_and(|summary| Some(summary.id) == self.assigned_to);
            if !still_matches {
                self.assignee = None;
            }
        }
        if changed {
            self.updated_at = clock.utc();
        }
        changed
    }

    /// Attaches nested profile summaries.
    pub fn set_summaries(
        &mut self,
        assignee: Option<ProfileSummary>,
        creator: Option<ProfileSummary>,
    ) {
        self.assignee = assignee;
        self.creator = creator;
    }

    /// Copies nested summaries from an earlier copy of the same task when
    /// this copy lacks them and the referenced user is unchanged.
    pub fn inherit_summaries(&mut self, previous: &Self) {
        if self.assignee.is_none() && self.assigned_to == previous.assigned_to {
            self.assignee.clone_from(&previous.assignee);
        }
        if self.creator.is_none() && self.created_by == previous.created_by {
            self.creator.clone_from(&previous.creator);
        }
    }
}

fn replace_if_different<T: PartialEq>(field: &mut T, candidate: Option<T>) -> bool {
    match candidate {
        Some(value) if *field != value => {
            *field = value;
            true
        }
        _ => false,
    }
}
