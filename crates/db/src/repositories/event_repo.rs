//! Repository for the `events` table.
//!
//! Reads aggregate each event's enrollment from `event_enrollments` into
//! `enrolled_person_ids`, in enrollment order.

use camp_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, UpdateEvent};

/// Select list for an `events e` query, including the aggregated enrollment.
const COLUMNS: &str = "e.id, e.title, e.starts_at, e.ends_at, e.room_id, e.capacity, \
     e.assigned_staff_ids, e.required_certifications, \
     ARRAY(SELECT en.person_id FROM event_enrollments en \
           WHERE en.event_id = e.id ORDER BY en.id) AS enrolled_person_ids, \
     e.created_at, e.updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event and return it with its (empty) enrollment.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO events
                (title, starts_at, ends_at, room_id, capacity,
                 assigned_staff_ids, required_certifications)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.room_id)
        .bind(input.capacity)
        .bind(&input.assigned_staff_ids)
        .bind(&input.required_certifications)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events e WHERE e.id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all events in chronological order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events e ORDER BY e.starts_at, e.id");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE events SET
                title = COALESCE($2, title),
                starts_at = COALESCE($3, starts_at),
                ends_at = COALESCE($4, ends_at),
                room_id = COALESCE($5, room_id),
                capacity = COALESCE($6, capacity),
                assigned_staff_ids = COALESCE($7, assigned_staff_ids),
                required_certifications = COALESCE($8, required_certifications)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.room_id)
        .bind(input.capacity)
        .bind(&input.assigned_staff_ids)
        .bind(&input.required_certifications)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete an event by ID. Enrollments cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
