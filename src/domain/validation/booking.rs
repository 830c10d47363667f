use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use super::ValidationError;
use crate::domain::models::booking::{Booking, BookingDraft};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Shape checks only. Whether `event_id` points at a stored event is decided by the
/// write path, which has repository access.
pub fn prepare_booking(draft: BookingDraft, persisted: Option<&Booking>) -> Result<Booking, ValidationError> {
    let event_id = draft
        .event_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingEventId)?;

    let email = draft
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|e| !e.is_empty())
        .ok_or(ValidationError::EmptyField("email"))?;
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    let now = Utc::now();
    Ok(Booking {
        id: persisted.map(|p| p.id.clone()).unwrap_or_else(|| Uuid::new_v4().to_string()),
        event_id,
        email,
        created_at: persisted.map_or(now, |p| p.created_at),
        updated_at: persisted.map_or(now, |p| p.updated_at),
    })
}
