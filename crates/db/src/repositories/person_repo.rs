//! Repository for the `people` table.

use camp_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{CreatePerson, Person, UpdatePerson};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for people (campers).
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!("INSERT INTO people (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a person by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all people ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people ORDER BY name, id");
        sqlx::query_as::<_, Person>(&query).fetch_all(pool).await
    }

    /// Update a person. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE people SET name = COALESCE($2, name) WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a person by ID. Enrollments cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
