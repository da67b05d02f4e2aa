// SPDX-License-Identifier: MIT

//! Integration tests for user deletion: external cleanup, token revocation,
//! and the run cascade.

use axum::http::StatusCode;

mod common;

use common::{body_json, create_test_app_with, request, run_payload, spawn_stub_server, user_payload};

#[tokio::test]
async fn test_delete_removes_user_and_cascades_runs() {
    let (stub_url, seen) = spawn_stub_server(StatusCode::NO_CONTENT).await;
    let (app, state) = create_test_app_with(Some(&stub_url), Some(&stub_url)).await;

    request(&app, "POST", "/users", Some(user_payload(1, "pinco@gmail.it"))).await;
    request(
        &app,
        "POST",
        "/add_runs",
        Some(serde_json::json!({ "1": [run_payload(3, 1_520_072_989, 33.23)] })),
    )
    .await;

    let response = request(&app, "DELETE", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Both cleanup endpoints were hit
    let paths = seen.lock().unwrap().clone();
    assert!(paths.contains(&"/users/1/challenges".to_string()));
    assert!(paths.contains(&"/users/1/objectives".to_string()));

    // User and their runs are gone
    let response = request(&app, "GET", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(state.db.get_run_for_user(1, 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_user_not_found() {
    let (stub_url, _seen) = spawn_stub_server(StatusCode::NO_CONTENT).await;
    let (app, _state) = create_test_app_with(Some(&stub_url), None).await;

    let response = request(&app, "DELETE", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cleanup_failure_aborts_delete() {
    let (stub_url, _seen) = spawn_stub_server(StatusCode::INTERNAL_SERVER_ERROR).await;
    let (app, state) = create_test_app_with(Some(&stub_url), None).await;

    request(&app, "POST", "/users", Some(user_payload(1, "pinco@gmail.it"))).await;
    request(
        &app,
        "POST",
        "/add_runs",
        Some(serde_json::json!({ "1": [run_payload(3, 1_520_072_989, 33.23)] })),
    )
    .await;

    let response = request(&app, "DELETE", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was deleted
    let response = request(&app, "GET", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.db.get_run_for_user(1, 1).await.unwrap().is_some());
}

#[tokio::test]
async fn test_token_revocation_called_for_token_holders() {
    let (cleanup_url, _cleanup_seen) = spawn_stub_server(StatusCode::NO_CONTENT).await;
    let (strava_url, strava_seen) = spawn_stub_server(StatusCode::OK).await;
    let (app, _state) = create_test_app_with(Some(&cleanup_url), Some(&strava_url)).await;

    let mut payload = user_payload(1, "pinco@gmail.it");
    payload["strava_token"] = serde_json::json!("token-abc");
    request(&app, "POST", "/users", Some(payload)).await;

    let response = request(&app, "DELETE", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let paths = strava_seen.lock().unwrap().clone();
    assert!(paths.contains(&"/oauth/deauthorize".to_string()));
}

#[tokio::test]
async fn test_revocation_failure_aborts_delete() {
    let (cleanup_url, _cleanup_seen) = spawn_stub_server(StatusCode::NO_CONTENT).await;
    let (strava_url, _strava_seen) = spawn_stub_server(StatusCode::UNAUTHORIZED).await;
    let (app, _state) = create_test_app_with(Some(&cleanup_url), Some(&strava_url)).await;

    let mut payload = user_payload(1, "pinco@gmail.it");
    payload["strava_token"] = serde_json::json!("token-abc");
    request(&app, "POST", "/users", Some(payload)).await;

    let response = request(&app, "DELETE", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = request(&app, "GET", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_without_token_skips_revocation() {
    let (cleanup_url, _cleanup_seen) = spawn_stub_server(StatusCode::NO_CONTENT).await;
    // Strava base points at the unreachable default; delete must still work
    let (app, _state) = create_test_app_with(Some(&cleanup_url), None).await;

    request(&app, "POST", "/users", Some(user_payload(1, "pinco@gmail.it"))).await;

    let response = request(&app, "DELETE", "/users/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = request(&app, "GET", "/users", None).await;
    let body = body_json(response).await;
    assert_eq!(body["users"], serde_json::json!([]));
}
