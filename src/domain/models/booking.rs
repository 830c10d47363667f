use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    pub event_id: Option<String>,
    pub email: Option<String>,
}

impl BookingDraft {
    pub fn new(event_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            event_id: Some(event_id.into()),
            email: Some(email.into()),
        }
    }

    pub fn merged_over(self, persisted: &Booking) -> Self {
        Self {
            event_id: self.event_id.or_else(|| Some(persisted.event_id.clone())),
            email: self.email.or_else(|| Some(persisted.email.clone())),
        }
    }
}
