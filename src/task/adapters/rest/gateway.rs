//! PostgREST-backed task gateway.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use tracing::instrument;

use super::models::{NewTaskRow, TASK_SELECT, TaskPatchRow, TaskRow, into_tasks};
use crate::backend::{BackendClient, BackendError, check_response};
use crate::task::{
    domain::{NewTask, Task, TaskFilter, TaskId, TaskPatch},
    ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
};

const TASKS_TABLE: &str = "tasks";
const DUE_DATE_ORDER: &str = "due_date.asc.nullslast";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Task gateway talking to the `tasks` table of the hosted backend.
///
/// Requests carry whatever session the wrapped client is bound to; row level
/// security on the backend decides what that session may see.
#[derive(Debug, Clone)]
pub struct RestTaskGateway {
    client: BackendClient,
}

impl RestTaskGateway {
    /// Creates a gateway over a configured backend client.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    fn tasks(&self, method: Method) -> TaskGatewayResult<RequestBuilder> {
        let url = self
            .client
            .rest_url(TASKS_TABLE)
            .map_err(TaskGatewayError::unavailable)?;
        Ok(self.client.request(method, url))
    }

    async fn fetch_rows(
        &self,
        request: RequestBuilder,
        id: Option<TaskId>,
    ) -> TaskGatewayResult<Vec<Task>> {
        let sent = request
            .send()
            .await
            .map_err(|err| map_backend_error(BackendError::from(err), id))?;
        let response = check_response(sent)
            .await
            .map_err(|err| map_backend_error(err, id))?;
        let rows: Vec<TaskRow> = response
            .json()
            .await
            .map_err(|err| map_backend_error(BackendError::Decode(err.to_string()), id))?;
        into_tasks(rows).map_err(|err| map_backend_error(err, id))
    }

    async fn fetch_one(&self, request: RequestBuilder, id: TaskId) -> TaskGatewayResult<Task> {
        self.fetch_rows(request, Some(id))
            .await?
            .into_iter()
            .next()
            .ok_or(TaskGatewayError::NotFound(id))
    }
}

#[async_trait]
impl TaskGateway for RestTaskGateway {
    #[instrument(skip(self), err)]
    async fn list_tasks(&self, filter: TaskFilter) -> TaskGatewayResult<Vec<Task>> {
        let mut query = vec![
            ("select", TASK_SELECT.to_owned()),
            ("order", DUE_DATE_ORDER.to_owned()),
        ];
        if let Some(status) = filter.status {
            query.push(("status", format!("eq.{status}")));
        }
        if let Some(priority) = filter.priority {
            query.push(("priority", format!("eq.{priority}")));
        }
        if let Some(user) = filter.assigned_to {
            query.push(("assigned_to", format!("eq.{user}")));
        }
        let request = self.tasks(Method::GET)?.query(&query);
        self.fetch_rows(request, None).await
    }

    #[instrument(skip(self), err)]
    async fn find_task(&self, id: TaskId) -> TaskGatewayResult<Task> {
        let request = self
            .tasks(Method::GET)?
            .query(&[("select", TASK_SELECT.to_owned()), ("id", format!("eq.{id}"))]);
        self.fetch_one(request, id).await
    }

    #[instrument(skip(self, task), fields(title = task.title()), err)]
    async fn create_task(&self, task: &NewTask) -> TaskGatewayResult<Task> {
        let request = self
            .tasks(Method::POST)?
            .query(&[("select", TASK_SELECT)])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&NewTaskRow::from(task));
        self.fetch_rows(request, None)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                TaskGatewayError::unavailable(BackendError::Decode(
                    "insert returned no rows".to_owned(),
                ))
            })
    }

    #[instrument(skip(self, patch), err)]
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskGatewayResult<Task> {
        if patch.is_empty() {
            return self.find_task(id).await;
        }
        let request = self
            .tasks(Method::PATCH)?
            .query(&[("select", TASK_SELECT.to_owned()), ("id", format!("eq.{id}"))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&TaskPatchRow::from(patch));
        self.fetch_one(request, id).await
    }

    #[instrument(skip(self), err)]
    async fn delete_task(&self, id: TaskId) -> TaskGatewayResult<()> {
        let request = self
            .tasks(Method::DELETE)?
            .query(&[("select", "id".to_owned()), ("id", format!("eq.{id}"))])
            .header("Prefer", RETURN_REPRESENTATION);
        let sent = request
            .send()
            .await
            .map_err(|err| map_backend_error(BackendError::from(err), Some(id)))?;
        let response = check_response(sent)
            .await
            .map_err(|err| map_backend_error(err, Some(id)))?;
        let deleted: Vec<serde_json::Value> = response.json().await.map_err(|err| {
            map_backend_error(BackendError::Decode(err.to_string()), Some(id))
        })?;
        if deleted.is_empty() {
            return Err(TaskGatewayError::NotFound(id));
        }
        Ok(())
    }
}

fn map_backend_error(err: BackendError, id: Option<TaskId>) -> TaskGatewayError {
    match (err, id) {
        (BackendError::NotFound(_), Some(task)) => TaskGatewayError::NotFound(task),
        (BackendError::Rejected { message, .. }, _) => TaskGatewayError::Rejected(message),
        (other, _) => TaskGatewayError::unavailable(other),
    }
}
