use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    models::event::{Event, EventDraft},
    ports::EventRepository,
    validation::event::prepare_event,
};
use crate::error::AppError;

pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, draft: EventDraft) -> Result<Event, AppError> {
        let event = prepare_event(draft, None).inspect_err(|e| warn!("Rejected event create: {}", e))?;
        let created = self.repo.create(&event).await?;
        info!("Event created: {}", created.slug);
        Ok(created)
    }

    /// Applies a partial patch to the event stored under `slug` and re-validates the
    /// whole record.
    pub async fn update(&self, slug: &str, patch: EventDraft) -> Result<Event, AppError> {
        let persisted = self.get(slug).await?;
        let event = prepare_event(patch.merged_over(&persisted), Some(&persisted))
            .inspect_err(|e| warn!("Rejected event update for {}: {}", slug, e))?;
        let updated = self.repo.update(&event).await?;
        if updated.slug != persisted.slug {
            info!("Event {} renamed, slug {} -> {}", updated.id, persisted.slug, updated.slug);
        }
        Ok(updated)
    }

    pub async fn get(&self, slug: &str) -> Result<Event, AppError> {
        self.repo.find_by_slug(slug).await?
            .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", slug)))
    }

    pub async fn list(&self) -> Result<Vec<Event>, AppError> {
        self.repo.list().await
    }

    /// Bookings of the deleted event are left untouched.
    pub async fn delete(&self, slug: &str) -> Result<(), AppError> {
        let event = self.get(slug).await?;
        self.repo.delete(&event.id).await?;
        info!("Event deleted: {}", slug);
        Ok(())
    }
}
