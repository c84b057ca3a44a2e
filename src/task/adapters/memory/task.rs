//! In-memory gateway for task tests and offline use.

use async_trait::async_trait;
use mockable::DefaultClock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::profile::domain::{ProfileSummary, UserId};
use crate::task::{
    domain::{NewTask, Task, TaskFilter, TaskId, TaskPatch},
    ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
};

/// Thread-safe in-memory task gateway.
///
/// Records are kept in insertion order and listed by due date ascending with
/// undated tasks last, matching the backend ordering. Profile summaries
/// registered with [`InMemoryTaskGateway::register_profile`] are attached to
/// the records returned from every call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskGateway {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    profiles: HashMap<UserId, ProfileSummary>,
    unavailable: bool,
    update_calls: usize,
}

impl InMemoryTaskState {
    fn ensure_available(&self) -> TaskGatewayResult<()> {
        if self.unavailable {
            return Err(TaskGatewayError::unavailable(std::io::Error::other(
                "in-memory backend marked unavailable",
            )));
        }
        Ok(())
    }

    fn position(&self, id: TaskId) -> TaskGatewayResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskGatewayError::NotFound(id))
    }

    fn hydrate(&self, task: &Task) -> Task {
        let mut hydrated = task.clone();
        let assignee = task
            .assignee()
            .cloned()
            .or_else(|| task.assigned_to().and_then(|id| self.profiles.get(&id).cloned()));
        let creator = task
            .creator()
            .cloned()
            .or_else(|| self.profiles.get(&task.created_by()).cloned());
        hydrated.set_summaries(assignee, creator);
        hydrated
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskGatewayError {
    TaskGatewayError::unavailable(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing record, replacing any record with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Unavailable`] when lock acquisition fails.
    pub fn insert(&self, task: Task) -> TaskGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(existing) = state.tasks.iter_mut().find(|t| t.id() == task.id()) {
            *existing = task;
        } else {
            state.tasks.push(task);
        }
        Ok(())
    }

    /// Registers the summary attached to tasks referencing this profile.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Unavailable`] when lock acquisition fails.
    pub fn register_profile(&self, summary: ProfileSummary) -> TaskGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.profiles.insert(summary.id, summary);
        Ok(())
    }

    /// Makes every subsequent call fail as if the backend were unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Unavailable`] when lock acquisition fails.
    pub fn set_unavailable(&self, unavailable: bool) -> TaskGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.unavailable = unavailable;
        Ok(())
    }

    /// Returns how many update calls reached the gateway, including failed
    /// ones.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Unavailable`] when lock acquisition fails.
    pub fn update_calls(&self) -> TaskGatewayResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.update_calls)
    }
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn list_tasks(&self, filter: TaskFilter) -> TaskGatewayResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        state.ensure_available()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|task| filter.matches(task))
            .map(|task| state.hydrate(task))
            .collect();
        tasks.sort_by_key(|task| (task.due_date().is_none(), task.due_date()));
        Ok(tasks)
    }

    async fn find_task(&self, id: TaskId) -> TaskGatewayResult<Task> {
        let state = self.state.read().map_err(lock_error)?;
        state.ensure_available()?;
        let index = state.position(id)?;
        state
            .tasks
            .get(index)
            .map(|task| state.hydrate(task))
            .ok_or(TaskGatewayError::NotFound(id))
    }

    async fn create_task(&self, task: &NewTask) -> TaskGatewayResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.ensure_available()?;
        let created = Task::create(task.clone(), &DefaultClock);
        state.tasks.push(created.clone());
        Ok(state.hydrate(&created))
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskGatewayResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.update_calls += 1;
        state.ensure_available()?;
        let index = state.position(id)?;
        let task = state
            .tasks
            .get_mut(index)
            .ok_or(TaskGatewayError::NotFound(id))?;
        task.apply(patch, &DefaultClock);
        let updated = task.clone();
        Ok(state.hydrate(&updated))
    }

    async fn delete_task(&self, id: TaskId) -> TaskGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.ensure_available()?;
        let index = state.position(id)?;
        state.tasks.remove(index);
        Ok(())
    }
}
