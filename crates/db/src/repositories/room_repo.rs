//! Repository for the `rooms` table.

use camp_core::types::DbId;
use sqlx::PgPool;

use crate::models::room::{CreateRoom, Room, UpdateRoom};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, capacity, created_at, updated_at";

/// Provides CRUD operations for rooms.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a new room, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (name, capacity) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(&input.name)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    /// Find a room by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all rooms ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY id");
        sqlx::query_as::<_, Room>(&query).fetch_all(pool).await
    }

    /// Update a room. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET
                name = COALESCE($2, name),
                capacity = COALESCE($3, capacity)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a room by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign key violation while events still use the room.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
