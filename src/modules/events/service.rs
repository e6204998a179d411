use anyhow::{Context, anyhow};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use evently_core::{AppError, PaginationParams};
use evently_models::{Event, EventRequest};

const SELECT_EVENT: &str =
    "SELECT id, name, description, location, date_time, user_id, created_at FROM events";

pub struct EventService;

impl EventService {
    #[instrument(skip(db))]
    pub async fn list_events(
        db: &SqlitePool,
        params: &PaginationParams,
    ) -> Result<(Vec<Event>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(db)
            .await
            .context("Failed to count events")
            .map_err(AppError::database)?;

        let events = sqlx::query_as::<_, Event>(&format!(
            "{} ORDER BY date_time ASC, id ASC LIMIT ? OFFSET ?",
            SELECT_EVENT
        ))
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(db)
        .await
        .context("Failed to fetch events")
        .map_err(AppError::database)?;

        Ok((events, total))
    }

    #[instrument(skip(db))]
    pub async fn get_event(db: &SqlitePool, id: i64) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(&format!("{} WHERE id = ?", SELECT_EVENT))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch event by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Event not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_event(
        db: &SqlitePool,
        user_id: i64,
        dto: EventRequest,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, description, location, date_time, user_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, description, location, date_time, user_id, created_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.description.trim())
        .bind(dto.location.trim())
        .bind(dto.date_time)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(db)
        .await
        .context("Failed to create event")
        .map_err(AppError::database)?;

        info!(event_id = event.id, "event created");
        Ok(event)
    }

    /// Replaces every editable field. Ownership is checked by the caller.
    #[instrument(skip(db, dto))]
    pub async fn update_event(
        db: &SqlitePool,
        id: i64,
        dto: EventRequest,
    ) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET name = ?, description = ?, location = ?, date_time = ?
            WHERE id = ?
            RETURNING id, name, description, location, date_time, user_id, created_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.description.trim())
        .bind(dto.location.trim())
        .bind(dto.date_time)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to update event")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Event not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_event(db: &SqlitePool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete event")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Event not found")));
        }

        info!(event_id = id, "event deleted");
        Ok(())
    }
}
