mod common;

use axum::http::StatusCode;
use common::{event_payload, parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_health_reports_database_up() {
    let app = TestApp::new();
    let res = app.request("GET", "/health", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["database"], "up");
    assert!(app.state.database.is_connected().await);
}

#[tokio::test]
async fn test_concurrent_first_requests_share_the_connection() {
    let app = TestApp::new();

    let app_ref = &app;
    let requests = (0..8).map(move |i| {
        let payload = event_payload(&format!("Parallel Event {}", i));
        let app = app_ref;
        async move { app.request("POST", "/api/v1/events", Some(payload)).await.status() }
    });
    let statuses = futures_util::future::join_all(requests).await;
    assert!(statuses.iter().all(|s| *s == StatusCode::CREATED), "{:?}", statuses);

    let res = app.request("GET", "/api/v1/events", None).await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_unreachable_database_surfaces_as_unavailable() {
    let app = TestApp::unreachable();

    let res = app.request("GET", "/health", None).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let res = app.request("POST", "/api/v1/events", Some(event_payload("Never Stored"))).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    // Each call retries instead of replaying the earlier failure.
    let res = app.request("GET", "/api/v1/events", None).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_startup_survives_unreachable_database() {
    let app = TestApp::bootstrapped_unreachable().await;
    assert!(!app.state.database.is_connected().await);

    let res = app.request("GET", "/health", None).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let res = app.request("GET", "/api/v1/events", None).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_validation_runs_before_storage_is_touched() {
    let app = TestApp::unreachable();

    let mut payload = event_payload("Bad Time");
    payload["time"] = json!("25:00");
    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
