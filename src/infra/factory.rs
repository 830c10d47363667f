use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::ports::{BookingRepository, EventRepository};
use crate::domain::services::{booking_service::BookingService, event_service::EventService};
use crate::error::AppError;
use crate::infra::db::{ConnectionCache, PostgresConnector, SqliteConnector};
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_event_repo::PostgresEventRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_event_repo::SqliteEventRepo,
};
use crate::state::AppState;

/// The process-wide connection cache, for whichever backend `DATABASE_URL` names.
#[derive(Clone)]
pub enum Database {
    Postgres(Arc<ConnectionCache<PostgresConnector>>),
    Sqlite(Arc<ConnectionCache<SqliteConnector>>),
}

impl Database {
    pub async fn is_connected(&self) -> bool {
        match self {
            Database::Postgres(cache) => cache.is_connected().await,
            Database::Sqlite(cache) => cache.is_connected().await,
        }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        match self {
            Database::Postgres(cache) => {
                let pool = cache.get_connection().await?;
                sqlx::query("SELECT 1").execute(&pool).await?;
            }
            Database::Sqlite(cache) => {
                let pool = cache.get_connection().await?;
                sqlx::query("SELECT 1").execute(&pool).await?;
            }
        }
        Ok(())
    }
}

/// Wires repositories and services around one connection cache. Nothing connects
/// here; the first repository call does.
pub fn build_state(config: &Config) -> AppState {
    let settings = config.database.clone();

    let (database, event_repo, booking_repo): (Database, Arc<dyn EventRepository>, Arc<dyn BookingRepository>) =
        if settings.is_postgres() {
            info!("Using PostgreSQL backend");
            let cache = Arc::new(ConnectionCache::new(PostgresConnector::new(settings)));
            (
                Database::Postgres(cache.clone()),
                Arc::new(PostgresEventRepo::new(cache.clone())),
                Arc::new(PostgresBookingRepo::new(cache)),
            )
        } else {
            info!("Using SQLite backend");
            let cache = Arc::new(ConnectionCache::new(SqliteConnector::new(settings)));
            (
                Database::Sqlite(cache.clone()),
                Arc::new(SqliteEventRepo::new(cache.clone())),
                Arc::new(SqliteBookingRepo::new(cache)),
            )
        };

    AppState {
        config: config.clone(),
        database,
        event_service: Arc::new(EventService::new(event_repo.clone())),
        booking_service: Arc::new(BookingService::new(booking_repo, event_repo)),
    }
}

/// Builds the state and tries the shared connection once, so a bad address shows
/// up in the startup logs. A failed attempt is not fatal: the cache stays empty and
/// the next request connects again.
pub async fn bootstrap_state(config: &Config) -> AppState {
    let state = build_state(config);
    if let Err(e) = state.database.ping().await {
        warn!("Database not reachable at startup, serving anyway: {}", e);
    }
    state
}
