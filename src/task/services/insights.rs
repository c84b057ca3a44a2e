//! Derived dashboard and workload views over a task slice.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::profile::domain::{ProfileSummary, UserId, UserSession};
use crate::task::{
    domain::{Task, TaskFilter, TaskPriority, TaskStatus},
    ports::{TaskGateway, TaskGatewayResult},
};

/// Number of tasks shown in the dashboard's recent list.
pub const RECENT_TASK_LIMIT: usize = 5;

/// Headline counts for a set of tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStatistics {
    /// All tasks.
    pub total: usize,
    /// Tasks in the Done column.
    pub completed: usize,
    /// Tasks in the In-Progress column.
    pub in_progress: usize,
    /// Tasks in the To-Do column.
    pub todo: usize,
    /// Tasks with urgent priority.
    pub urgent: usize,
    /// Unfinished tasks whose due date has passed.
    pub overdue: usize,
}

impl TaskStatistics {
    /// Counts `tasks` as of `now`.
    #[must_use]
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status() {
                TaskStatus::Todo => stats.todo += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Done => stats.completed += 1,
            }
            if task.priority() == TaskPriority::Urgent {
                stats.urgent += 1;
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            stats
        })
    }
}

/// Per-assignee task counts for the team workflow view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadEntry {
    /// The assignee.
    pub assignee: ProfileSummary,
    /// Tasks still to do.
    pub todo: usize,
    /// Tasks in progress.
    pub in_progress: usize,
    /// Finished tasks.
    pub done: usize,
}

impl WorkloadEntry {
    fn new(assignee: ProfileSummary) -> Self {
        Self {
            assignee,
            todo: 0,
            in_progress: 0,
            done: 0,
        }
    }

    fn count(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Todo => self.todo += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Done => self.done += 1,
        }
    }

    /// Returns the number of tasks assigned to this member.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }
}

/// Groups tasks by assignee in order of first appearance.
///
/// Tasks without an assignee summary are skipped.
#[must_use]
pub fn workload(tasks: &[Task]) -> Vec<WorkloadEntry> {
    let mut positions: HashMap<UserId, usize> = HashMap::new();
    let mut entries: Vec<WorkloadEntry> = Vec::new();
    for task in tasks {
        let Some(assignee) = task.assignee() else {
            continue;
        };
        let position = *positions.entry(assignee.id).or_insert_with(|| {
            entries.push(WorkloadEntry::new(assignee.clone()));
            entries.len() - 1
        });
        if let Some(entry) = entries.get_mut(position) {
            entry.count(task.status());
        }
    }
    entries
}

/// Returns up to `limit` tasks, newest first by creation time.
#[must_use]
pub fn recent(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
    sorted.truncate(limit);
    sorted
}

/// Everything the dashboard view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// Headline counts over all visible tasks.
    pub statistics: TaskStatistics,
    /// Per-assignee counts.
    pub workload: Vec<WorkloadEntry>,
    /// Tasks assigned to the session user, in server order.
    pub my_tasks: Vec<Task>,
    /// Most recently created tasks.
    pub recent: Vec<Task>,
}

/// Builds the dashboard from one task list load.
#[derive(Clone)]
pub struct DashboardService<G, C>
where
    G: TaskGateway + ?Sized,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    clock: Arc<C>,
}

impl<G, C> DashboardService<G, C>
where
    G: TaskGateway + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a dashboard service.
    #[must_use]
    pub const fn new(gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self { gateway, clock }
    }

    /// Loads every visible task and derives the dashboard for `session`.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the task list cannot be loaded.
    pub async fn load(&self, session: &UserSession) -> TaskGatewayResult<Dashboard> {
        let tasks = self.gateway.list_tasks(TaskFilter::all()).await?;
        let now = self.clock.utc();
        let user = session.user_id();
        Ok(Dashboard {
            statistics: TaskStatistics::compute(&tasks, now),
            workload: workload(&tasks),
            my_tasks: tasks
                .iter()
                .filter(|task| task.is_assigned_to(user))
                .cloned()
                .collect(),
            recent: recent(&tasks, RECENT_TASK_LIMIT),
        })
    }
}
