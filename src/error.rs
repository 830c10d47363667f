use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::domain::validation::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Connection error: {0}")]
    Connection(Arc<sqlx::Error>),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Referenced event does not exist: {0}")]
    ReferencedEventMissing(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for SQLite (2067) and PostgreSQL (23505) unique-constraint violations.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(e) => is_unique_violation(e),
            _ => false,
        }
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == "2067" || code == "23505")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_unique_violation() {
            return (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Resource already exists (duplicate entry)" })),
            )
                .into_response();
        }

        let (status, message) = match &self {
            AppError::Configuration(msg) => {
                error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
            AppError::Connection(e) => {
                error!("Database connection unavailable: {:?}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable".to_string())
            }
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Validation(rule) => (StatusCode::BAD_REQUEST, rule.to_string()),
            AppError::ReferencedEventMissing(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Referenced event does not exist".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
