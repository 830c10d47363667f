use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    models::booking::{Booking, BookingDraft},
    ports::{BookingRepository, EventRepository},
    validation::booking::prepare_booking,
};
use crate::error::AppError;

pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    events: Arc<dyn EventRepository>,
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { bookings, events }
    }

    pub async fn create(&self, draft: BookingDraft) -> Result<Booking, AppError> {
        let booking = prepare_booking(draft, None).inspect_err(|e| warn!("Rejected booking: {}", e))?;
        self.ensure_event_exists(&booking.event_id).await?;
        let created = self.bookings.create(&booking).await?;
        info!("Booking {} created for event {}", created.id, created.event_id);
        Ok(created)
    }

    /// The event reference is re-checked even when the patch leaves `event_id` alone.
    pub async fn update(&self, id: &str, patch: BookingDraft) -> Result<Booking, AppError> {
        let persisted = self.get(id).await?;
        let booking = prepare_booking(patch.merged_over(&persisted), Some(&persisted))
            .inspect_err(|e| warn!("Rejected booking update for {}: {}", id, e))?;
        self.ensure_event_exists(&booking.event_id).await?;
        self.bookings.update(&booking).await
    }

    pub async fn get(&self, id: &str) -> Result<Booking, AppError> {
        self.bookings.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    pub async fn list_for_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError> {
        self.bookings.list_by_event(event_id).await
    }

    // An event deleted between this check and the write still leaves a dangling booking.
    async fn ensure_event_exists(&self, event_id: &str) -> Result<(), AppError> {
        if !self.events.exists(event_id).await? {
            warn!("Booking references missing event {}", event_id);
            return Err(AppError::ReferencedEventMissing(event_id.to_string()));
        }
        Ok(())
    }
}
