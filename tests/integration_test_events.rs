mod common;

use axum::http::StatusCode;
use common::{event_payload, parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_create_event_normalizes_fields() {
    let app = TestApp::new();

    let mut payload = event_payload("React Summit 2025");
    payload["venue"] = json!("  Beurs van Berlage  ");
    payload["date"] = json!("2025-06-12");

    let body = app.create_event(payload).await;
    assert_eq!(body["slug"], "react-summit-2025");
    assert_eq!(body["date"], "2025-06-12T00:00:00.000Z");
    assert_eq!(body["time"], "09:00");
    assert_eq!(body["venue"], "Beurs van Berlage");
    assert_eq!(body["agenda"].as_array().unwrap().len(), 3);
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());

    let res = app.request("GET", "/api/v1/events/react-summit-2025", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = parse_body(res).await;
    assert_eq!(fetched["id"], body["id"]);
    assert_eq!(fetched["tags"], json!(["react", "frontend"]));
}

#[tokio::test]
async fn test_invalid_date_is_rejected() {
    let app = TestApp::new();
    let mut payload = event_payload("Broken Date");
    payload["date"] = json!("not-a-date");

    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Invalid date format");

    let res = app.request("GET", "/api/v1/events/broken-date", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_time_is_rejected() {
    let app = TestApp::new();

    for time in ["25:00", "9:00am", "9:00"] {
        let mut payload = event_payload("Bad Time");
        payload["time"] = json!(time);
        let res = app.request("POST", "/api/v1/events", Some(payload)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "time {} accepted", time);
        let body = parse_body(res).await;
        assert_eq!(body["error"], "Time must be in HH:mm format");
    }
}

#[tokio::test]
async fn test_blank_required_field_is_named() {
    let app = TestApp::new();

    let mut payload = event_payload("Blank Venue");
    payload["venue"] = json!("   ");
    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Field \"venue\" cannot be empty");

    let mut payload = event_payload("Missing Organizer");
    payload.as_object_mut().unwrap().remove("organizer");
    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Field \"organizer\" cannot be empty");
}

#[tokio::test]
async fn test_empty_agenda_and_tags_are_rejected() {
    let app = TestApp::new();

    let mut payload = event_payload("No Agenda");
    payload["agenda"] = json!([]);
    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Agenda must contain at least one item");

    let mut payload = event_payload("No Tags");
    payload["tags"] = json!([]);
    let res = app.request("POST", "/api/v1/events", Some(payload)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Tags must contain at least one item");
}

#[tokio::test]
async fn test_duplicate_slug_is_a_conflict() {
    let app = TestApp::new();
    app.create_event(event_payload("Rust Meetup")).await;

    let res = app.request("POST", "/api/v1/events", Some(event_payload("rust   meetup!"))).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app.request("GET", "/api/v1/events", None).await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_without_title_keeps_slug() {
    let app = TestApp::new();
    let created = app.create_event(event_payload("Next.js Conf 2025")).await;
    assert_eq!(created["slug"], "nextjs-conf-2025");

    let res = app.request(
        "PUT",
        "/api/v1/events/nextjs-conf-2025",
        Some(json!({ "venue": "Virtual", "time": "12:00" })),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["slug"], "nextjs-conf-2025");
    assert_eq!(updated["venue"], "Virtual");
    assert_eq!(updated["time"], "12:00");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_update_with_new_title_regenerates_slug() {
    let app = TestApp::new();
    app.create_event(event_payload("Web3 Dev Conference")).await;

    let res = app.request(
        "PUT",
        "/api/v1/events/web3-dev-conference",
        Some(json!({ "title": "Web3 Builders Summit" })),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["slug"], "web3-builders-summit");

    let res = app.request("GET", "/api/v1/events/web3-dev-conference", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = app.request("GET", "/api/v1/events/web3-builders-summit", None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_update_leaves_record_untouched() {
    let app = TestApp::new();
    app.create_event(event_payload("JavaScript Global Summit")).await;

    let res = app.request(
        "PUT",
        "/api/v1/events/javascript-global-summit",
        Some(json!({ "title": "JS Summit", "date": "not-a-date" })),
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.request("GET", "/api/v1/events/javascript-global-summit", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["title"], "JavaScript Global Summit");
    assert_eq!(body["date"], "2025-06-12T00:00:00.000Z");
}

#[tokio::test]
async fn test_list_returns_cards() {
    let app = TestApp::new();
    app.create_event(event_payload("First Event")).await;
    app.create_event(event_payload("Second Event")).await;

    let res = app.request("GET", "/api/v1/events", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cards = parse_body(res).await;
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 2);

    for card in cards {
        let keys: Vec<&str> = card.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 6);
        for key in ["slug", "title", "image", "location", "date", "time"] {
            assert!(card.get(key).is_some(), "card missing {}", key);
        }
    }
}

#[tokio::test]
async fn test_delete_event() {
    let app = TestApp::new();
    app.create_event(event_payload("Short Lived")).await;

    let res = app.request("DELETE", "/api/v1/events/short-lived", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("DELETE", "/api/v1/events/short-lived", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
