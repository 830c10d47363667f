use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use crate::infra::db::{retry_insert, retry_write, ConnectionCache, PostgresConnector};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

pub struct PostgresBookingRepo {
    db: Arc<ConnectionCache<PostgresConnector>>,
}

impl PostgresBookingRepo {
    pub fn new(db: Arc<ConnectionCache<PostgresConnector>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let pool = &self.db.get_connection().await?;
        let now = Utc::now();
        retry_insert(
            self.db.settings().retry_writes,
            move || async move {
                sqlx::query_as::<_, Booking>(
                    "INSERT INTO bookings (id, event_id, email, created_at, updated_at)
                     VALUES ($1, $2, $3, $4, $5)
                     RETURNING *"
                )
                    .bind(&booking.id).bind(&booking.event_id).bind(&booking.email).bind(now).bind(now)
                    .fetch_one(pool).await
            },
            move || async move {
                sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
                    .bind(&booking.id)
                    .fetch_optional(pool)
                    .await
            },
        )
        .await
    }
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        let pool = &self.db.get_connection().await?;
        let now = Utc::now();
        retry_write(self.db.settings().retry_writes, move || async move {
            sqlx::query_as::<_, Booking>(
                "UPDATE bookings SET event_id=$1, email=$2, updated_at=$3 WHERE id=$4 RETURNING *"
            )
                .bind(&booking.event_id).bind(&booking.email).bind(now).bind(&booking.id)
                .fetch_one(pool).await
        })
        .await
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        let pool = self.db.get_connection().await?;
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&pool).await.map_err(AppError::Database)
    }
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError> {
        let pool = self.db.get_connection().await?;
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE event_id = $1 ORDER BY created_at ASC").bind(event_id).fetch_all(&pool).await.map_err(AppError::Database)
    }
}
