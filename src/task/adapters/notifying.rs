//! Gateway decorator that announces successful changes.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::task::{
    domain::{NewTask, Task, TaskFilter, TaskId, TaskPatch},
    ports::{NotifierResult, TaskEvent, TaskGateway, TaskGatewayResult, TaskNotifier},
};

/// Notifier that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl TaskNotifier for NoopNotifier {
    async fn notify(&self, _event: &TaskEvent) -> NotifierResult<()> {
        Ok(())
    }
}

/// Wraps a [`TaskGateway`] and emits a [`TaskEvent`] after each successful
/// create or each update that changes status, priority, or assignment.
///
/// Updates are compared against the record read just before the write, so
/// repeating a value that is already stored stays silent. Delivery is awaited
/// inline; failures are logged and never turn a successful mutation into an
/// error.
#[derive(Debug)]
pub struct NotifyingTaskGateway<G, N: ?Sized> {
    inner: G,
    notifier: Arc<N>,
}

impl<G, N: ?Sized> NotifyingTaskGateway<G, N> {
    /// Decorates `inner` with `notifier`.
    #[must_use]
    pub const fn new(inner: G, notifier: Arc<N>) -> Self {
        Self { inner, notifier }
    }
}

impl<G, N> NotifyingTaskGateway<G, N>
where
    N: TaskNotifier + ?Sized,
{
    async fn announce(&self, event: TaskEvent) {
        if let Err(err) = self.notifier.notify(&event).await {
            warn!(
                event = event.as_str(),
                task_id = %event.task().id(),
                error = %err,
                "task notification failed"
            );
        }
    }
}

fn update_event(patch: &TaskPatch, prior: Option<&Task>, task: Task) -> Option<TaskEvent> {
    let Some(before) = prior else {
        return fallback_event(patch, task);
    };
    let reassigned = task.assigned_to() != before.assigned_to();
    if reassigned && task.assigned_to().is_some() {
        return Some(TaskEvent::Assigned(task));
    }
    let changed = reassigned
        || task.status() != before.status()
        || task.priority() != before.priority();
    changed.then_some(TaskEvent::Updated(task))
}

// Without a prior record the patch alone decides.
fn fallback_event(patch: &TaskPatch, task: Task) -> Option<TaskEvent> {
    if !patch.touches_tracked_fields() {
        return None;
    }
    if matches!(patch.assigned_to(), Some(Some(_))) {
        return Some(TaskEvent::Assigned(task));
    }
    Some(TaskEvent::Updated(task))
}

#[async_trait]
impl<G, N> TaskGateway for NotifyingTaskGateway<G, N>
where
    G: TaskGateway,
    N: TaskNotifier + ?Sized,
{
    async fn list_tasks(&self, filter: TaskFilter) -> TaskGatewayResult<Vec<Task>> {
        self.inner.list_tasks(filter).await
    }

    async fn find_task(&self, id: TaskId) -> TaskGatewayResult<Task> {
        self.inner.find_task(id).await
    }

    async fn create_task(&self, task: &NewTask) -> TaskGatewayResult<Task> {
        let created = self.inner.create_task(task).await?;
        self.announce(TaskEvent::Created(created.clone())).await;
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskGatewayResult<Task> {
        if !patch.touches_tracked_fields() {
            return self.inner.update_task(id, patch).await;
        }
        let prior = self
            .inner
            .find_task(id)
            .await
            .inspect_err(|err| debug!(task_id = %id, error = %err, "prior task read failed"))
            .ok();
        let updated = self.inner.update_task(id, patch).await?;
        if let Some(event) = update_event(patch, prior.as_ref(), updated.clone()) {
            self.announce(event).await;
        }
        Ok(updated)
    }

    async fn delete_task(&self, id: TaskId) -> TaskGatewayResult<()> {
        self.inner.delete_task(id).await
    }
}
