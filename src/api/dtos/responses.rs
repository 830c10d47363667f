use crate::domain::models::event::Event;
use serde::Serialize;

/// The subset of an event a listing card renders.
#[derive(Serialize)]
pub struct EventCardResponse {
    pub slug: String,
    pub title: String,
    pub image: String,
    pub location: String,
    pub date: String,
    pub time: String,
}

impl From<Event> for EventCardResponse {
    fn from(event: Event) -> Self {
        Self {
            slug: event.slug,
            title: event.title,
            image: event.image,
            location: event.location,
            date: event.date,
            time: event.time,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}
