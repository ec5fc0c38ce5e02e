//! Credential handling on public and protected routes.

use super::helpers::{TestApp, app, kind_of};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::TimeDelta;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;
use taskgate::auth::domain::{Identity, Role, Subject};
use taskgate::task::services::Operation;
use uuid::Uuid;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reads_need_no_credential(app: TestApp) {
    let (project_id, task_id) = app.seed().await;

    for uri in [
        "/api/tasks".to_owned(),
        format!("/api/tasks/{task_id}"),
        "/api/projects".to_owned(),
        format!("/api/projects/{project_id}"),
    ] {
        let reply = app.send(Method::GET, &uri, None, None).await;
        assert_eq!(reply.status, StatusCode::OK, "GET {uri}");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mutation_without_credential_is_unauthorized(app: TestApp) {
    let (_, task_id) = app.seed().await;
    let reply = app
        .send(
            Method::POST,
            &format!("/api/tasks/{task_id}/changeProgress"),
            None,
            Some(json!(50)),
        )
        .await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(kind_of(&reply.body), "MissingCredential");
    assert_eq!(
        reply
            .headers
            .get(header::WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok()),
        Some("Bearer")
    );
}

#[rstest]
#[case("Basic YWxpY2U6c2VjcmV0", "MissingCredential")]
#[case("Bearer not-a-jwt", "MalformedToken")]
#[tokio::test(flavor = "multi_thread")]
async fn unusable_credentials_are_classified(
    app: TestApp,
    #[case] header_value: &str,
    #[case] expected: &str,
) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/projects")
        .header(header::AUTHORIZATION, header_value)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"name": "P1"}).to_string()))
        .expect("request should build");
    let reply = app.send_raw(request).await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(kind_of(&reply.body), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_token_is_rejected(app: TestApp) {
    let identity = Identity::new(Subject::new("alice").expect("valid subject"), Role::Admin);
    let expired = app
        .codec()
        .issue_with_ttl(&identity, TimeDelta::seconds(-60), &DefaultClock)
        .expect("token should be issued");

    let reply = app
        .send(
            Method::POST,
            "/api/projects",
            Some(&expired),
            Some(json!({"name": "P1"})),
        )
        .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(kind_of(&reply.body), "ExpiredToken");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_signature_is_invalid(app: TestApp) {
    let other = TestApp::with_secret("a-completely-different-secret-value!");
    let token = other.token("alice", Role::Admin);

    let reply = app
        .send(
            Method::POST,
            "/api/projects",
            Some(&token),
            Some(json!({"name": "P1"})),
        )
        .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(kind_of(&reply.body), "InvalidToken");
}

fn request_for(operation: Operation) -> (Method, String) {
    let method =
        Method::from_bytes(operation.method().as_str().as_bytes()).expect("known method");
    let uri = operation
        .path_pattern()
        .replace(":id", &Uuid::new_v4().to_string());
    (method, uri)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_operation_is_served_under_its_credential_rule(app: TestApp) {
    let alice = app.token("alice", Role::Admin);
    for operation in Operation::ALL {
        let (method, uri) = request_for(operation);

        let anonymous = app.send(method.clone(), &uri, None, None).await;
        if operation.rule().requires_identity() {
            assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED, "{operation}");
            assert_eq!(kind_of(&anonymous.body), "MissingCredential", "{operation}");
        } else {
            assert!(
                anonymous.status.is_success() || kind_of(&anonymous.body) == "NotFound",
                "{operation} answered {}",
                anonymous.status
            );
        }

        let authenticated = app.send(method, &uri, Some(&alice), None).await;
        assert!(
            authenticated.status.is_success() || !kind_of(&authenticated.body).is_empty(),
            "{operation} is not routed: {}",
            authenticated.status
        );
    }
}
