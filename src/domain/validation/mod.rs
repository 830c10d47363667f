//! Pure checks run by the write path right before a record reaches storage.
//!
//! Every rule is a small function returning a typed [`ValidationError`]; the
//! `prepare_*` entry points run them in a fixed order and stop at the first failure.

pub mod booking;
pub mod event;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field \"{0}\" cannot be empty")]
    EmptyField(&'static str),
    #[error("Invalid date format")]
    InvalidDate,
    #[error("Time must be in HH:mm format")]
    InvalidTime,
    #[error("Agenda must contain at least one item")]
    EmptyAgenda,
    #[error("Tags must contain at least one item")]
    EmptyTags,
    #[error("Title does not produce a usable slug")]
    EmptySlug,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Field \"event_id\" is required")]
    MissingEventId,
}

/// Trims a required text field, rejecting it when absent or blank.
pub fn required_text(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::EmptyField(field)),
    }
}
