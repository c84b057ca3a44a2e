//! PostgREST task gateway against a mock backend.

use rstest::rstest;
use serde_json::json;
use teamboard::{
    profile::domain::UserId,
    task::{
        adapters::rest::RestTaskGateway,
        domain::{NewTask, TaskFilter, TaskId, TaskPatch, TaskStatus},
        ports::{TaskGateway, TaskGatewayError},
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
};

use super::helpers::{ANON_KEY, SESSION_TOKEN, session_client, task_row};

const TASKS_PATH: &str = "/rest/v1/tasks";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_sends_filters_ordering_and_session_headers() {
    let server = MockServer::start().await;
    let assignee = UserId::new();
    let id = TaskId::new();
    Mock::given(method("GET"))
        .and(path(TASKS_PATH))
        .and(query_param("order", "due_date.asc.nullslast"))
        .and(query_param("status", "eq.Devam Ediyor"))
        .and(query_param("assigned_to", format!("eq.{assignee}")))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", format!("Bearer {SESSION_TOKEN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_row(
            id,
            "Fix import job",
            TaskStatus::InProgress,
            assignee
        )])))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = RestTaskGateway::new(session_client(&server));

    let tasks = gateway
        .list_tasks(
            TaskFilter::all()
                .with_status(TaskStatus::InProgress)
                .with_assignee(assignee),
        )
        .await
        .expect("list should succeed");

    assert_eq!(tasks.len(), 1);
    let task = tasks.first().expect("one task");
    assert_eq!(task.id(), id);
    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(
        task.assignee().map(|summary| summary.full_name.as_str()),
        Some("Zeynep Kaya")
    );
    assert_eq!(
        task.due_date().map(|due| due.to_rfc3339()),
        Some("2026-10-20T00:00:00+00:00".to_owned())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_is_a_single_patch_returning_the_record() {
    let server = MockServer::start().await;
    let id = TaskId::new();
    Mock::given(method("PATCH"))
        .and(path(TASKS_PATH))
        .and(query_param("id", format!("eq.{id}")))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({ "status": "Tamamlandı" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_row(
            id,
            "Fix import job",
            TaskStatus::Done,
            UserId::new()
        )])))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = RestTaskGateway::new(session_client(&server));

    let task = gateway
        .update_status(id, TaskStatus::Done)
        .await
        .expect("update should succeed");

    assert_eq!(task.status(), TaskStatus::Done);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_hidden_by_row_security_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(TASKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let gateway = RestTaskGateway::new(session_client(&server));
    let id = TaskId::new();

    let err = gateway
        .update_status(id, TaskStatus::Done)
        .await
        .expect_err("no row came back");

    assert!(matches!(err, TaskGatewayError::NotFound(missing) if missing == id));
}

#[rstest]
#[case(400, json!({ "message": "new row violates check constraint" }), true)]
#[case(503, json!({ "message": "upstream unavailable" }), false)]
#[tokio::test(flavor = "multi_thread")]
async fn error_statuses_are_classified(
    #[case] status: u16,
    #[case] body: serde_json::Value,
    #[case] rejected: bool,
) {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(TASKS_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    let gateway = RestTaskGateway::new(session_client(&server));

    let err = gateway
        .update_status(TaskId::new(), TaskStatus::Todo)
        .await
        .expect_err("backend refused");

    if rejected {
        assert!(matches!(
            err,
            TaskGatewayError::Rejected(ref message) if message == "new row violates check constraint"
        ));
    } else {
        assert!(matches!(err, TaskGatewayError::Unavailable(_)));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_posts_the_row_and_returns_the_representation() {
    let server = MockServer::start().await;
    let creator = UserId::new();
    let id = TaskId::new();
    Mock::given(method("POST"))
        .and(path(TASKS_PATH))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({
            "title": "Fix import job",
            "status": "Yapılacak",
            "priority": "Orta",
            "created_by": creator.to_string(),
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([task_row(
            id,
            "Fix import job",
            TaskStatus::Todo,
            UserId::new()
        )])))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = RestTaskGateway::new(session_client(&server));
    let new_task = NewTask::new("Fix import job", creator).expect("title is valid");

    let created = gateway
        .create_task(&new_task)
        .await
        .expect("insert should succeed");

    assert_eq!(created.id(), id);
    assert_eq!(created.status(), TaskStatus::Todo);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_patch_reads_instead_of_writing() {
    let server = MockServer::start().await;
    let id = TaskId::new();
    Mock::given(method("GET"))
        .and(path(TASKS_PATH))
        .and(query_param("id", format!("eq.{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_row(
            id,
            "Fix import job",
            TaskStatus::Todo,
            UserId::new()
        )])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(TASKS_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let gateway = RestTaskGateway::new(session_client(&server));

    let task = gateway
        .update_task(id, &TaskPatch::new())
        .await
        .expect("read should succeed");

    assert_eq!(task.id(), id);
}

#[rstest]
#[case(json!([{ "id": "6f1c1d2e-8d7a-4b7e-9f59-1f9e1c0f4a11" }]), true)]
#[case(json!([]), false)]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_missing_rows(#[case] body: serde_json::Value, #[case] existed: bool) {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(TASKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = RestTaskGateway::new(session_client(&server));

    let result = gateway.delete_task(TaskId::new()).await;

    if existed {
        assert!(result.is_ok());
    } else {
        assert!(matches!(result, Err(TaskGatewayError::NotFound(_))));
    }
}
