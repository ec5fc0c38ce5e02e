//! Task routes: lifecycle, status mapping and ownership.

use super::helpers::{TestApp, app, id_of, kind_of};
use axum::http::{Method, StatusCode, header};
use rstest::rstest;
use serde_json::{Value, json};
use taskgate::auth::domain::Role;
use uuid::Uuid;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_open_and_located(app: TestApp) {
    let alice = app.token("alice", Role::Admin);
    let project = app
        .send(Method::POST, "/api/projects", Some(&alice), Some(json!({"name": "P1"})))
        .await;
    let reply = app
        .send(
            Method::POST,
            "/api/tasks",
            Some(&alice),
            Some(json!({
                "name": "Ship it",
                "description": "release notes",
                "type": "FEATURE",
                "owner": "bob",
                "project": id_of(&project.body),
            })),
        )
        .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    let id = id_of(&reply.body);
    assert_eq!(
        reply
            .headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some(format!("/api/tasks/{id}").as_str())
    );
    assert_eq!(reply.body["state"], "OPEN");
    assert_eq!(reply.body["resolution"], Value::Null);
    assert_eq!(reply.body["progress"], 0);
    assert_eq!(reply.body["type"], "FEATURE");
    assert_eq!(reply.body["owner"], "bob");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_cannot_change_state(app: TestApp) {
    let (_, task_id) = app.seed().await;
    let bob = app.token("bob", Role::User);
    let reply = app
        .send(
            Method::POST,
            &format!("/api/tasks/{task_id}/changeState"),
            Some(&bob),
            Some(json!("CLOSED")),
        )
        .await;

    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(kind_of(&reply.body), "Forbidden");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_task_maps_invalid_state_per_route(app: TestApp) {
    let (project_id, task_id) = app.seed().await;
    let alice = app.token("alice", Role::Admin);
    let bob = app.token("bob", Role::User);
    let carol = app.token("carol", Role::User);

    let closed = app
        .send(
            Method::POST,
            &format!("/api/tasks/{task_id}/changeState"),
            Some(&alice),
            Some(json!("CLOSED")),
        )
        .await;
    assert_eq!(closed.status, StatusCode::OK);
    assert_eq!(closed.body["state"], "CLOSED");

    let resolution = app
        .send(
            Method::POST,
            &format!("/api/tasks/{task_id}/changeResolution"),
            Some(&bob),
            Some(json!("WONTFIX")),
        )
        .await;
    assert_eq!(resolution.status, StatusCode::CONFLICT);
    assert_eq!(kind_of(&resolution.body), "InvalidState");

    let progress = app
        .send(
            Method::POST,
            &format!("/api/tasks/{task_id}/changeProgress"),
            Some(&bob),
            Some(json!(10)),
        )
        .await;
    assert_eq!(progress.status, StatusCode::CONFLICT);

    let comment = app
        .send(
            Method::POST,
            "/api/comments",
            Some(&carol),
            Some(json!({"taskId": task_id, "text": "ping"})),
        )
        .await;
    assert_eq!(comment.status, StatusCode::NOT_FOUND);
    assert_eq!(kind_of(&comment.body), "InvalidState");

    let update = app
        .send(
            Method::PUT,
            &format!("/api/tasks/{task_id}"),
            Some(&alice),
            Some(json!({"name": "T7b", "type": "BUG", "owner": "bob", "project": project_id})),
        )
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let task = app
        .send(Method::GET, &format!("/api/tasks/{task_id}"), None, None)
        .await;
    assert_eq!(task.body["resolution"], Value::Null);
    assert_eq!(task.body["name"], "T7");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolution_belongs_to_task_owner(app: TestApp) {
    let (_, task_id) = app.seed().await;
    let uri = format!("/api/tasks/{task_id}/changeResolution");

    let by_admin = app
        .send(
            Method::POST,
            &uri,
            Some(&app.token("alice", Role::Admin)),
            Some(json!("FIXED")),
        )
        .await;
    assert_eq!(by_admin.status, StatusCode::FORBIDDEN);

    let by_owner = app
        .send(
            Method::POST,
            &uri,
            Some(&app.token("bob", Role::User)),
            Some(json!("FIXED")),
        )
        .await;
    assert_eq!(by_owner.status, StatusCode::OK);
    assert_eq!(by_owner.body["resolution"], "FIXED");
}

#[rstest]
#[case(json!(101))]
#[case(json!(-1))]
#[case(json!("half"))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_progress_is_bad_request(app: TestApp, #[case] body: Value) {
    let (_, task_id) = app.seed().await;
    let reply = app
        .send(
            Method::POST,
            &format!("/api/tasks/{task_id}/changeProgress"),
            Some(&app.token("bob", Role::User)),
            Some(body),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(kind_of(&reply.body), "InvalidArgument");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_state_is_bad_request(app: TestApp) {
    let (_, task_id) = app.seed().await;
    let reply = app
        .send(
            Method::POST,
            &format!("/api/tasks/{task_id}/changeState"),
            Some(&app.token("alice", Role::Admin)),
            Some(json!("DONE")),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_and_malformed_ids(app: TestApp) {
    let missing = app
        .send(Method::GET, &format!("/api/tasks/{}", Uuid::new_v4()), None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(kind_of(&missing.body), "NotFound");

    let malformed = app.send(Method::GET, "/api/tasks/T7", None, None).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_owner_deletes_task(app: TestApp) {
    let (_, task_id) = app.seed().await;
    let uri = format!("/api/tasks/{task_id}");

    let by_stranger = app
        .send(Method::DELETE, &uri, Some(&app.token("dora", Role::Admin)), None)
        .await;
    assert_eq!(by_stranger.status, StatusCode::FORBIDDEN);

    let deleted = app
        .send(Method::DELETE, &uri, Some(&app.token("alice", Role::Admin)), None)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_filters_by_owner(app: TestApp) {
    let (project_id, _) = app.seed().await;
    let alice = app.token("alice", Role::Admin);
    let extra = app
        .send(
            Method::POST,
            "/api/tasks",
            Some(&alice),
            Some(json!({"name": "T8", "type": "SUPPORT", "owner": "carol", "project": project_id})),
        )
        .await;
    assert_eq!(extra.status, StatusCode::CREATED);

    let all = app.send(Method::GET, "/api/tasks", None, None).await;
    let bobs = app.send(Method::GET, "/api/tasks?owner=bob", None, None).await;

    assert_eq!(all.body.as_array().map(Vec::len), Some(2));
    let owners: Vec<&Value> = bobs
        .body
        .as_array()
        .map(|tasks| tasks.iter().map(|task| &task["owner"]).collect())
        .unwrap_or_default();
    assert_eq!(owners, vec![&json!("bob")]);
}
