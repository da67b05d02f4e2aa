// SPDX-License-Identifier: MIT

use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::Router;
use beepbeep_dataservice::config::Config;
use beepbeep_dataservice::db::Database;
use beepbeep_dataservice::routes::create_router;
use beepbeep_dataservice::services::{CleanupClient, StravaClient};
use beepbeep_dataservice::AppState;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Create a test app backed by an in-memory database.
///
/// The external-service URLs point at unreachable defaults; tests that
/// exercise deletion use `create_test_app_with` and a stub server.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(None, None).await
}

/// Create a test app, overriding the cleanup and/or Strava base URLs.
#[allow(dead_code)]
pub async fn create_test_app_with(
    cleanup_url: Option<&str>,
    strava_url: Option<&str>,
) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    if let Some(url) = cleanup_url {
        config.challenges_url = url.to_string();
        config.objectives_url = url.to_string();
    }
    if let Some(url) = strava_url {
        config.strava_api_url = url.to_string();
    }

    let db = Database::new(&config.database_url)
        .await
        .expect("Failed to open in-memory database");
    let cleanup = CleanupClient::new(&config.challenges_url, &config.objectives_url);
    let strava = StravaClient::new(&config.strava_api_url);

    let state = Arc::new(AppState {
        config,
        db,
        cleanup,
        strava,
    });

    (create_router(state.clone()), state)
}

/// Spawn a stub collaborator server on an ephemeral port.
///
/// Every request gets the given status back; the paths seen are recorded so
/// tests can assert which cleanup calls were made.
#[allow(dead_code)]
pub async fn spawn_stub_server(status: StatusCode) -> (String, Arc<Mutex<Vec<String>>>) {
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let app = Router::new().fallback(move |req: Request| {
        let recorder = recorder.clone();
        async move {
            recorder.lock().unwrap().push(req.uri().path().to_string());
            status
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Stub server has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server died");
    });

    (format!("http://{}", addr), seen)
}

/// Send a request to the app, optionally with a JSON body.
#[allow(dead_code)]
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> axum::http::Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Standard user-creation payload used across tests.
#[allow(dead_code)]
pub fn user_payload(id: i64, email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "email": email,
        "firstname": "pinco",
        "lastname": "panco",
        "age": 2,
        "weight": 1,
        "max_hr": 2,
        "rest_hr": 1,
        "vo2max": 1
    })
}

/// Run payload as delivered by the Strava fetcher.
#[allow(dead_code)]
pub fn run_payload(strava_id: i64, start_date: i64, average_speed: f64) -> serde_json::Value {
    serde_json::json!({
        "title": "Run",
        "description": "Description",
        "strava_id": strava_id,
        "distance": 1000,
        "start_date": start_date,
        "elapsed_time": 1000,
        "average_speed": average_speed,
        "average_heartrate": 0,
        "total_elevation_gain": 12.2
    })
}
