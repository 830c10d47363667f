use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::EventRequest, responses::EventCardResponse};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating event: {}", payload.title.as_deref().unwrap_or_default());
    let created = state.event_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let cards: Vec<EventCardResponse> = state.event_service.list().await?
        .into_iter()
        .map(EventCardResponse::from)
        .collect();
    Ok(Json(cards))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.get(&slug).await?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.event_service.update(&slug, payload.into()).await?;
    info!("Event updated: {}", slug);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_service.delete(&slug).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
