use crate::domain::models::{booking::BookingDraft, event::EventDraft};
use serde::Deserialize;

/// Used for both create and update; on update, omitted fields keep their stored value.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct EventRequest {
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

impl From<EventRequest> for EventDraft {
    fn from(req: EventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            overview: req.overview,
            image: req.image,
            venue: req.venue,
            location: req.location,
            date: req.date,
            time: req.time,
            mode: req.mode,
            audience: req.audience,
            agenda: req.agenda,
            organizer: req.organizer,
            tags: req.tags,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct BookingRequest {
    pub event_id: Option<String>,
    pub email: Option<String>,
}

impl From<BookingRequest> for BookingDraft {
    fn from(req: BookingRequest) -> Self {
        Self {
            event_id: req.event_id,
            email: req.email,
        }
    }
}
