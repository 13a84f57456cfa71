//! Repository for the `camper_groups` table.

use camp_core::types::DbId;
use sqlx::PgPool;

use crate::models::group::{CreateGroup, Group};

const COLUMNS: &str = "id, name, member_ids, created_at, updated_at";

/// Provides create/read/delete operations for camper groups.
pub struct GroupRepo;

impl GroupRepo {
    pub async fn create(pool: &PgPool, input: &CreateGroup) -> Result<Group, sqlx::Error> {
        let query = format!(
            "INSERT INTO camper_groups (name, member_ids) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(&input.name)
            .bind(&input.member_ids)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM camper_groups WHERE id = $1");
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM camper_groups ORDER BY name");
        sqlx::query_as::<_, Group>(&query).fetch_all(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM camper_groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
