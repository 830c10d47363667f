use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::BookingRequest;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_booking: event {}", payload.event_id.as_deref().unwrap_or_default());
    let created = state.booking_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.get(&booking_id).await?;
    Ok(Json(booking))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<BookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.booking_service.update(&booking_id, payload.into()).await?;
    info!("Booking updated: {}", booking_id);
    Ok(Json(updated))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.get(&slug).await?;
    let bookings = state.booking_service.list_for_event(&event.id).await?;
    Ok(Json(bookings))
}
