use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::responses::HealthResponse;
use crate::state::AppState;
use std::sync::Arc;
use tracing::warn;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.database.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ok", database: "up" })),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { status: "degraded", database: "down" }),
            )
        }
    }
}
