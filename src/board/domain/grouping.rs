//! Tasks partitioned by status.

use std::collections::BTreeMap;

use crate::task::domain::{Task, TaskId, TaskStatus};

/// One ordered column of tasks per status.
///
/// Every status has a column, possibly empty, and every task appears in
/// exactly one column. Inserting a task whose identifier is already present
/// replaces the earlier record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGrouping {
    columns: BTreeMap<TaskStatus, Vec<Task>>,
}

impl Default for BoardGrouping {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGrouping {
    /// Creates a grouping with every column empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: TaskStatus::ALL
                .into_iter()
                .map(|status| (status, Vec::new()))
                .collect(),
        }
    }

    /// Partitions `tasks` by status, keeping their relative order.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut grouping = Self::new();
        for task in tasks {
            grouping.upsert(task);
        }
        grouping
    }

    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        self.columns.get(&status).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the status column currently holding `id`.
    #[must_use]
    pub fn status_of(&self, id: TaskId) -> Option<TaskStatus> {
        self.columns
            .iter()
            .find(|(_, tasks)| tasks.iter().any(|task| task.id() == id))
            .map(|(status, _)| *status)
    }

    /// Returns the task with `id`.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks().find(|task| task.id() == id)
    }

    /// Inserts or replaces a task.
    ///
    /// A task that stays in its column keeps its position; a task that
    /// changes column is appended to the end of its new column.
    pub fn upsert(&mut self, task: Task) {
        let status = task.status();
        if let Some(column) = self.columns.get_mut(&status) {
            if let Some(slot) = column.iter_mut().find(|held| held.id() == task.id()) {
                *slot = task;
                return;
            }
        }
        self.remove(task.id());
        self.columns.entry(status).or_default().push(task);
    }

    /// Removes and returns the task with `id`.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        self.columns.values_mut().find_map(|column| {
            column
                .iter()
                .position(|task| task.id() == id)
                .map(|index| column.remove(index))
        })
    }

    /// Iterates over every task in column order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.values().flatten()
    }

    /// Returns `(status, count)` for each column in board order.
    #[must_use]
    pub fn counts(&self) -> Vec<(TaskStatus, usize)> {
        self.columns
            .iter()
            .map(|(status, tasks)| (*status, tasks.len()))
            .collect()
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Returns `true` when no column holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.values().all(Vec::is_empty)
    }
}
