//! Chat webhook notifier.

use async_trait::async_trait;
use minijinja::{Environment, context};
use reqwest::Url;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::NotificationConfig;
use crate::task::ports::{NotifierError, NotifierResult, TaskEvent, TaskNotifier};

const CREATED_TEMPLATE: &str = "🆕 New task created: **{{ title }}**\n{{ url }}";
const UPDATED_TEMPLATE: &str =
    "🔄 Task updated: **{{ title }}** ({{ status }}, {{ priority }})\n{{ url }}";
const ASSIGNED_TEMPLATE: &str = "📌 Task assigned: **{{ title }}** -> {{ assignee }}\n{{ url }}";
const UNKNOWN_ASSIGNEE: &str = "Unknown user";
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts task events to a chat webhook as `{"content": ...}` messages.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: reqwest::Client,
    webhook_url: Url,
    app_base_url: String,
}

impl WebhookNotifier {
    /// Creates a notifier posting to `webhook_url` and linking tasks under
    /// `app_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when the HTTP client cannot be
    /// built.
    pub fn new(webhook_url: Url, app_base_url: impl Into<String>) -> NotifierResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(NotifierError::delivery)?;
        Ok(Self {
            http,
            webhook_url,
            app_base_url: app_base_url.into(),
        })
    }

    /// Builds a notifier when a webhook is configured; `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when the configured URL does not
    /// parse or the HTTP client cannot be built.
    pub fn from_config(config: &NotificationConfig) -> NotifierResult<Option<Self>> {
        let Some(raw) = config.webhook_url() else {
            return Ok(None);
        };
        let url = Url::parse(raw).map_err(NotifierError::delivery)?;
        Self::new(url, config.app_base_url.clone()).map(Some)
    }
}

#[async_trait]
impl TaskNotifier for WebhookNotifier {
    async fn notify(&self, event: &TaskEvent) -> NotifierResult<()> {
        let content = render_message(event, &self.app_base_url)?;
        debug!(event = event.as_str(), task_id = %event.task().id(), "posting webhook message");
        self.http
            .post(self.webhook_url.clone())
            .json(&json!({ "content": content }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(NotifierError::delivery)?;
        Ok(())
    }
}

/// Renders the chat message announcing `event`.
///
/// # Errors
///
/// Returns [`NotifierError::Render`] when the template fails to render.
pub fn render_message(event: &TaskEvent, app_base_url: &str) -> NotifierResult<String> {
    let task = event.task();
    let template = match event {
        TaskEvent::Created(_) => CREATED_TEMPLATE,
        TaskEvent::Updated(_) => UPDATED_TEMPLATE,
        TaskEvent::Assigned(_) => ASSIGNED_TEMPLATE,
    };
    let url = format!("{}/tasks/{}", app_base_url.trim_end_matches('/'), task.id());
    let assignee = task
        .assignee()
        .map_or(UNKNOWN_ASSIGNEE, |profile| profile.full_name.as_str());
    Environment::new()
        .render_str(
            template,
            context! {
                title => task.title(),
                status => task.status().as_str(),
                priority => task.priority().as_str(),
                assignee => assignee,
                url => url,
            },
        )
        .map_err(|err| NotifierError::Render(err.to_string()))
}
