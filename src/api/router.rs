use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, event, booking};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{slug}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/v1/events/{slug}/bookings", get(booking::list_bookings))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking).put(booking::update_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
