use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    /// Normalized instant, `YYYY-MM-DDTHH:MM:SS.sssZ`.
    pub date: String,
    /// 24-hour `HH:mm`, stored as given.
    pub time: String,
    pub mode: String,
    pub audience: String,
    #[sqlx(json)]
    pub agenda: Vec<String>,
    pub organizer: String,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated event fields as they arrive from a caller. Missing fields stay `None`
/// so the validator can name them.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub overview: Option<String>,
    pub image: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub mode: Option<String>,
    pub audience: Option<String>,
    pub agenda: Option<Vec<String>>,
    pub organizer: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl EventDraft {
    /// Fills every field the patch leaves out with the persisted value.
    pub fn merged_over(self, persisted: &Event) -> Self {
        Self {
            title: self.title.or_else(|| Some(persisted.title.clone())),
            description: self.description.or_else(|| Some(persisted.description.clone())),
            overview: self.overview.or_else(|| Some(persisted.overview.clone())),
            image: self.image.or_else(|| Some(persisted.image.clone())),
            venue: self.venue.or_else(|| Some(persisted.venue.clone())),
            location: self.location.or_else(|| Some(persisted.location.clone())),
            date: self.date.or_else(|| Some(persisted.date.clone())),
            time: self.time.or_else(|| Some(persisted.time.clone())),
            mode: self.mode.or_else(|| Some(persisted.mode.clone())),
            audience: self.audience.or_else(|| Some(persisted.audience.clone())),
            agenda: self.agenda.or_else(|| Some(persisted.agenda.clone())),
            organizer: self.organizer.or_else(|| Some(persisted.organizer.clone())),
            tags: self.tags.or_else(|| Some(persisted.tags.clone())),
        }
    }
}
