use std::sync::Arc;
use crate::config::Config;
use crate::domain::services::{booking_service::BookingService, event_service::EventService};
use crate::infra::factory::Database;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub database: Database,
    pub event_service: Arc<EventService>,
    pub booking_service: Arc<BookingService>,
}
