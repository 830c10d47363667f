use event_booking::{
    api::router::create_router,
    config::{Config, DatabaseSettings, Environment},
    infra::factory::{bootstrap_state, build_state},
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

fn test_config(db_url: String) -> Config {
    let mut database = DatabaseSettings::new(db_url);
    database.min_connections = 1;

    Config {
        environment: Environment::Development,
        database,
        port: 0,
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);
        Self::with_database_url(db_filename, db_url)
    }

    /// An app whose database can never be opened.
    #[allow(dead_code)]
    pub fn unreachable() -> Self {
        let missing_dir = format!("missing_{}", Uuid::new_v4());
        let db_url = format!("sqlite://{}/events.db", missing_dir);
        Self::with_database_url(String::new(), db_url)
    }

    /// Same as [`TestApp::unreachable`], but built the way the server starts up.
    #[allow(dead_code)]
    pub async fn bootstrapped_unreachable() -> Self {
        let missing_dir = format!("missing_{}", Uuid::new_v4());
        let config = test_config(format!("sqlite://{}/events.db", missing_dir));
        let state = Arc::new(bootstrap_state(&config).await);
        Self::from_state(String::new(), state)
    }

    fn with_database_url(db_filename: String, db_url: String) -> Self {
        let state = Arc::new(build_state(&test_config(db_url)));
        Self::from_state(db_filename, state)
    }

    fn from_state(db_filename: String, state: Arc<AppState>) -> Self {
        let router = create_router(state.clone());

        Self {
            router,
            db_filename,
            state,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    #[allow(dead_code)]
    pub async fn create_event(&self, payload: Value) -> Value {
        let res = self.request("POST", "/api/v1/events", Some(payload)).await;
        assert_eq!(res.status(), 201, "event creation failed");
        parse_body(res).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if self.db_filename.is_empty() {
            return;
        }
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub fn event_payload(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A full day of talks and workshops.",
        "overview": "Talks, workshops and networking.",
        "image": "/images/event1.png",
        "venue": "Beurs van Berlage",
        "location": "Amsterdam, Netherlands",
        "date": "2025-06-12",
        "time": "09:00",
        "mode": "offline",
        "audience": "Developers",
        "agenda": ["Keynote", "Workshops", "Closing panel"],
        "organizer": "GitNation",
        "tags": ["react", "frontend"]
    })
}
