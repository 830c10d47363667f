use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use crate::infra::db::{retry_insert, retry_write, ConnectionCache, SqliteConnector};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::sync::Arc;

pub struct SqliteEventRepo {
    db: Arc<ConnectionCache<SqliteConnector>>,
}

impl SqliteEventRepo {
    pub fn new(db: Arc<ConnectionCache<SqliteConnector>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        let pool = &self.db.get_connection().await?;
        let now = Utc::now();
        retry_insert(
            self.db.settings().retry_writes,
            move || async move {
                sqlx::query_as::<_, Event>(
                    r#"INSERT INTO events (
                        id, slug, title, description, overview, image, venue, location,
                        date, time, mode, audience, agenda, organizer, tags, created_at, updated_at
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    RETURNING *"#
                )
                    .bind(&event.id)
                    .bind(&event.slug)
                    .bind(&event.title)
                    .bind(&event.description)
                    .bind(&event.overview)
                    .bind(&event.image)
                    .bind(&event.venue)
                    .bind(&event.location)
                    .bind(&event.date)
                    .bind(&event.time)
                    .bind(&event.mode)
                    .bind(&event.audience)
                    .bind(Json(&event.agenda))
                    .bind(&event.organizer)
                    .bind(Json(&event.tags))
                    .bind(now)
                    .bind(now)
                    .fetch_one(pool)
                    .await
            },
            move || async move {
                sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
                    .bind(&event.id)
                    .fetch_optional(pool)
                    .await
            },
        )
        .await
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        let pool = &self.db.get_connection().await?;
        let now = Utc::now();
        retry_write(self.db.settings().retry_writes, move || async move {
            sqlx::query_as::<_, Event>(
                r#"UPDATE events SET
                    slug=?, title=?, description=?, overview=?, image=?, venue=?, location=?,
                    date=?, time=?, mode=?, audience=?, agenda=?, organizer=?, tags=?, updated_at=?
                   WHERE id=? RETURNING *"#
            )
                .bind(&event.slug)
                .bind(&event.title)
                .bind(&event.description)
                .bind(&event.overview)
                .bind(&event.image)
                .bind(&event.venue)
                .bind(&event.location)
                .bind(&event.date)
                .bind(&event.time)
                .bind(&event.mode)
                .bind(&event.audience)
                .bind(Json(&event.agenda))
                .bind(&event.organizer)
                .bind(Json(&event.tags))
                .bind(now)
                .bind(&event.id)
                .fetch_one(pool)
                .await
        })
        .await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, AppError> {
        let pool = self.db.get_connection().await?;
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&pool)
            .await
            .map_err(AppError::Database)
    }

    async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let pool = self.db.get_connection().await?;
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .map_err(AppError::Database)?;
        Ok(count > 0)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let pool = self.db.get_connection().await?;
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY created_at DESC")
            .fetch_all(&pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let pool = &self.db.get_connection().await?;
        let result = retry_write(self.db.settings().retry_writes, move || async move {
            sqlx::query("DELETE FROM events WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
        })
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
