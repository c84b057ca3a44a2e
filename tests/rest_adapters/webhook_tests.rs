//! Webhook delivery, alone and behind the notifying gateway decorator.

use std::sync::Arc;

use mockable::DefaultClock;
use reqwest::Url;
use rstest::rstest;
use serde_json::json;
use teamboard::{
    profile::domain::UserId,
    task::{
        adapters::{
            notifying::NotifyingTaskGateway,
            rest::{RestTaskGateway, WebhookNotifier, render_message},
        },
        domain::{NewTask, Task, TaskId, TaskPatch, TaskStatus},
        ports::{TaskEvent, TaskGateway, TaskNotifier},
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

use super::helpers::{session_client, task_row};

const HOOK_PATH: &str = "/hooks/team";
const APP_URL: &str = "https://board.example.com/";

fn notifier_for(server: &MockServer) -> WebhookNotifier {
    let url = Url::parse(&format!("{}{HOOK_PATH}", server.uri())).expect("hook url parses");
    WebhookNotifier::new(url, APP_URL).expect("notifier builds")
}

fn sample_task(status: TaskStatus) -> Task {
    let new_task = NewTask::new("Fix import job", UserId::new())
        .expect("title is valid")
        .with_status(status);
    Task::create(new_task, &DefaultClock)
}

async fn mount_prior_row(server: &MockServer, id: TaskId, status: TaskStatus, assignee: UserId) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("id", format!("eq.{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_row(
            id,
            "Fix import job",
            status,
            assignee
        )])))
        .expect(1)
        .mount(server)
        .await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_status_posts_no_second_message() {
    let server = MockServer::start().await;
    let id = TaskId::new();
    let assignee = UserId::new();
    mount_prior_row(&server, id, TaskStatus::Done, assignee).await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_row(
            id,
            "Fix import job",
            TaskStatus::Done,
            assignee
        )])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    let gateway = NotifyingTaskGateway::new(
        RestTaskGateway::new(session_client(&server)),
        Arc::new(notifier_for(&server)),
    );

    let task = gateway
        .update_status(id, TaskStatus::Done)
        .await
        .expect("status write should succeed");

    assert_eq!(task.status(), TaskStatus::Done);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn event_is_posted_as_content_message() {
    let server = MockServer::start().await;
    let event = TaskEvent::Created(sample_task(TaskStatus::Todo));
    let expected = render_message(&event, APP_URL).expect("message renders");
    assert!(expected.contains("https://board.example.com/tasks/"));
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(body_json(json!({ "content": expected })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    notifier_for(&server)
        .notify(&event)
        .await
        .expect("delivery should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn webhook_error_status_is_a_delivery_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let event = TaskEvent::Updated(sample_task(TaskStatus::Done));

    let result = notifier_for(&server).notify(&event).await;

    assert!(result.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_through_the_gateway_announces_the_assignee() {
    let server = MockServer::start().await;
    let id = TaskId::new();
    let assignee = UserId::new();
    mount_prior_row(&server, id, TaskStatus::Todo, UserId::new()).await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_row(
            id,
            "Fix import job",
            TaskStatus::Todo,
            assignee
        )])))
        .expect(1)
        .mount(&server)
        .await;
    let expected = format!(
        "📌 Task assigned: **Fix import job** -> Zeynep Kaya\nhttps://board.example.com/tasks/{id}"
    );
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(body_json(json!({ "content": expected })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = NotifyingTaskGateway::new(
        RestTaskGateway::new(session_client(&server)),
        Arc::new(notifier_for(&server)),
    );

    let task = gateway
        .update_task(id, &TaskPatch::new().with_assignee(Some(assignee)))
        .await
        .expect("assignment should succeed");

    assert_eq!(task.assigned_to(), Some(assignee));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_webhook_does_not_fail_the_status_change() {
    let server = MockServer::start().await;
    let id = TaskId::new();
    let assignee = UserId::new();
    mount_prior_row(&server, id, TaskStatus::Todo, assignee).await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_row(
            id,
            "Fix import job",
            TaskStatus::Done,
            assignee
        )])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = NotifyingTaskGateway::new(
        RestTaskGateway::new(session_client(&server)),
        Arc::new(notifier_for(&server)),
    );

    let task = gateway
        .update_status(id, TaskStatus::Done)
        .await
        .expect("status change should succeed");

    assert_eq!(task.status(), TaskStatus::Done);
}
