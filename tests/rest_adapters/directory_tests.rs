//! PostgREST profile directory against a mock backend.

use rstest::rstest;
use serde_json::json;
use teamboard::profile::{
    adapters::rest::RestProfileDirectory,
    domain::{NewProfile, UserId, UserType},
    ports::{ProfileDirectory, ProfileDirectoryError},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
};

use super::helpers::{SERVICE_KEY, client_for, profile_row, session_client};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_reads_one_profile_row() {
    let server = MockServer::start().await;
    let id = UserId::new();
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", format!("eq.{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([profile_row(id, "Zeynep Kaya", "team_leader")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let directory = RestProfileDirectory::new(session_client(&server));

    let profile = directory.find(id).await.expect("profile exists");

    assert_eq!(profile.full_name(), "Zeynep Kaya");
    assert_eq!(profile.user_type(), UserType::TeamLeader);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_without_rows_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let directory = RestProfileDirectory::new(session_client(&server));
    let id = UserId::new();

    let err = directory.find(id).await.expect_err("no such profile");

    assert!(matches!(err, ProfileDirectoryError::NotFound(missing) if missing == id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_registers_account_then_inserts_profile() {
    let server = MockServer::start().await;
    let id = UserId::new();
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .and(header("apikey", SERVICE_KEY))
        .and(body_partial_json(json!({
            "email": "zeynep.kaya@example.com",
            "password": "temp-secret",
            "email_confirm": true,
            "user_metadata": { "full_name": "Zeynep Kaya" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id.to_string() })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .and(body_partial_json(json!({
            "id": id.to_string(),
            "role": "Backend",
            "user_type": "team_member"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([profile_row(id, "Zeynep Kaya", "team_member")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let directory = RestProfileDirectory::new(client_for(&server, Some(SERVICE_KEY)));
    let new_profile = NewProfile::new(
        "zeynep.kaya@example.com",
        "Zeynep Kaya",
        "Backend",
        UserType::TeamMember,
    )
    .expect("fields are valid");

    let profile = directory
        .create(&new_profile, "temp-secret")
        .await
        .expect("member should be created");

    assert_eq!(profile.id(), id);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_service_role_key_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let directory = RestProfileDirectory::new(session_client(&server));
    let new_profile = NewProfile::new(
        "zeynep.kaya@example.com",
        "Zeynep Kaya",
        "Backend",
        UserType::TeamMember,
    )
    .expect("fields are valid");

    let err = directory
        .create(&new_profile, "temp-secret")
        .await
        .expect_err("service role key is missing");

    assert!(matches!(err, ProfileDirectoryError::Unavailable(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_profile_insert_after_account_creation_is_reported() {
    let server = MockServer::start().await;
    let id = UserId::new();
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id.to_string() })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "message": "upstream unavailable" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let directory = RestProfileDirectory::new(client_for(&server, Some(SERVICE_KEY)));
    let new_profile = NewProfile::new(
        "zeynep.kaya@example.com",
        "Zeynep Kaya",
        "Backend",
        UserType::TeamMember,
    )
    .expect("fields are valid");

    let err = directory
        .create(&new_profile, "temp-secret")
        .await
        .expect_err("profile insert failed");

    assert!(matches!(err, ProfileDirectoryError::Unavailable(_)));
}
