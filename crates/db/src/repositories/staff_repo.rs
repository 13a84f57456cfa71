//! Repository for the `staff_members` table.

use camp_core::types::DbId;
use sqlx::PgPool;

use crate::models::staff::{CreateStaffMember, StaffMember, UpdateStaffMember};

const COLUMNS: &str = "id, name, certifications, created_at, updated_at";

/// Provides CRUD operations for staff members.
pub struct StaffRepo;

impl StaffRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateStaffMember,
    ) -> Result<StaffMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff_members (name, certifications) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StaffMember>(&query)
            .bind(&input.name)
            .bind(&input.certifications)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StaffMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_members WHERE id = $1");
        sqlx::query_as::<_, StaffMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<StaffMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_members ORDER BY name, id");
        sqlx::query_as::<_, StaffMember>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a staff member. A present `certifications` list replaces the stored one.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStaffMember,
    ) -> Result<Option<StaffMember>, sqlx::Error> {
        let query = format!(
            "UPDATE staff_members SET
                name = COALESCE($2, name),
                certifications = COALESCE($3, certifications)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StaffMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.certifications)
            .fetch_optional(pool)
            .await
    }

    /// Delete a staff member. Events keep the dangling id in their
    /// assignment list; the audit treats it as absent.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM staff_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
