//! Wire representations of task rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::BackendError;
use crate::profile::domain::{ProfileSummary, UserId};
use crate::task::domain::{
    NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskRecord, TaskStatus,
};

/// Columns selected for every task read, including the nested assignee and
/// creator summaries resolved through their foreign keys.
pub(super) const TASK_SELECT: &str = "*,\
assignee:profiles!tasks_assigned_to_fkey(id,full_name,role,user_type,avatar_url),\
creator:profiles!tasks_created_by_fkey(id,full_name)";

/// Task row as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct TaskRow {
    pub(super) id: TaskId,
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: Option<String>,
    pub(super) status: TaskStatus,
    pub(super) priority: TaskPriority,
    #[serde(default)]
    pub(super) due_date: Option<String>,
    #[serde(default)]
    pub(super) assigned_to: Option<UserId>,
    pub(super) created_by: UserId,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
    #[serde(default)]
    pub(super) assignee: Option<ProfileSummary>,
    #[serde(default)]
    pub(super) creator: Option<ProfileSummary>,
}

impl TryFrom<TaskRow> for Task {
    type Error = BackendError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let due_date = row.due_date.as_deref().map(parse_due_date).transpose()?;
        Ok(Self::from_record(TaskRecord {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            status: row.status,
            priority: row.priority,
            due_date,
            assigned_to: row.assigned_to,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
            assignee: row.assignee,
            creator: row.creator,
        }))
    }
}

/// Converts decoded rows into domain tasks.
pub(super) fn into_tasks(rows: Vec<TaskRow>) -> Result<Vec<Task>, BackendError> {
    rows.into_iter().map(Task::try_from).collect()
}

/// Accepts RFC 3339 timestamps, timestamps without offset, and plain dates.
///
/// Offset-less values are interpreted as UTC; plain dates as midnight UTC.
pub(super) fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, BackendError> {
    let value = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| BackendError::Decode(format!("unparsable due date '{raw}'")))
}

/// Insert body for a new task.
#[derive(Debug, Serialize)]
pub(super) struct NewTaskRow<'a> {
    title: &'a str,
    description: &'a str,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<String>,
    assigned_to: Option<UserId>,
    created_by: UserId,
}

impl<'a> From<&'a NewTask> for NewTaskRow<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            title: task.title(),
            description: task.description(),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date().map(|due| due.to_rfc3339()),
            assigned_to: task.assigned_to(),
            created_by: task.created_by(),
        }
    }
}

/// Partial update body; absent fields are omitted, cleared fields are sent
/// as `null`.
#[derive(Debug, Serialize)]
pub(super) struct TaskPatchRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_to: Option<Option<UserId>>,
}

impl<'a> From<&'a TaskPatch> for TaskPatchRow<'a> {
    fn from(patch: &'a TaskPatch) -> Self {
        Self {
            title: patch.title(),
            description: patch.description(),
            status: patch.status(),
            priority: patch.priority(),
            due_date: patch.due_date().map(|due| due.map(|value| value.to_rfc3339())),
            assigned_to: patch.assigned_to(),
        }
    }
}
