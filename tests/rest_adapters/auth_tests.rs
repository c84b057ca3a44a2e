//! GoTrue authentication gateway against a mock backend.

use rstest::rstest;
use serde_json::json;
use teamboard::profile::{
    adapters::rest::RestAuthGateway,
    domain::{AuthSession, UserId},
    ports::{AuthError, AuthGateway},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
};

use super::helpers::{ANON_KEY, client_for};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn password_grant_yields_session() {
    let server = MockServer::start().await;
    let user = UserId::new();
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON_KEY))
        .and(body_partial_json(json!({
            "email": "selin@example.com",
            "password": "hunter22"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-access",
            "refresh_token": "jwt-refresh",
            "expires_at": 1_792_000_000,
            "token_type": "bearer",
            "user": { "id": user.to_string(), "email": "selin@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = RestAuthGateway::new(client_for(&server, None));

    let session = gateway
        .sign_in("selin@example.com", "hunter22")
        .await
        .expect("sign-in should succeed");

    assert_eq!(session.access_token(), "jwt-access");
    assert_eq!(session.refresh_token(), Some("jwt-refresh"));
    assert_eq!(session.user_id(), user);
    assert_eq!(
        session.expires_at().map(|at| at.timestamp()),
        Some(1_792_000_000)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_grant_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;
    let gateway = RestAuthGateway::new(client_for(&server, None));

    let err = gateway
        .sign_in("selin@example.com", "wrong")
        .await
        .expect_err("credentials are wrong");

    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[rstest]
#[case(200, true)]
#[case(401, false)]
#[tokio::test(flavor = "multi_thread")]
async fn current_user_resolves_live_tokens_only(#[case] status: u16, #[case] live: bool) {
    let server = MockServer::start().await;
    let user = UserId::new();
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "id": user.to_string(),
            "msg": "session expired"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = RestAuthGateway::new(client_for(&server, None));

    let resolved = gateway
        .current_user("stored-token")
        .await
        .expect("lookup should not fail");

    assert_eq!(resolved, live.then_some(user));
}

#[rstest]
#[case(204)]
#[case(401)]
#[tokio::test(flavor = "multi_thread")]
async fn sign_out_tolerates_already_expired_sessions(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer jwt-access"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = RestAuthGateway::new(client_for(&server, None));
    let session = AuthSession::new("jwt-access", UserId::new());

    gateway
        .sign_out(&session)
        .await
        .expect("sign-out should succeed");
}
