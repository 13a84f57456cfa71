//! Repository for the `event_enrollments` join table.
//!
//! Writes are idempotent so that retried or concurrent enrollments of the
//! same camper never fail on the unique constraint.

use camp_core::types::DbId;
use sqlx::PgPool;

/// Provides insert/delete/list operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Enroll `person_id` in `event_id`. Returns `true` if a new row was written.
    pub async fn insert(pool: &PgPool, event_id: DbId, person_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO event_enrollments (event_id, person_id)
             VALUES ($1, $2)
             ON CONFLICT (event_id, person_id) DO NOTHING",
        )
        .bind(event_id)
        .bind(person_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove `person_id` from `event_id`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, event_id: DbId, person_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM event_enrollments WHERE event_id = $1 AND person_id = $2")
                .bind(event_id)
                .bind(person_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Person IDs enrolled in `event_id`, in enrollment order.
    pub async fn list_for_event(pool: &PgPool, event_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT person_id FROM event_enrollments WHERE event_id = $1 ORDER BY id",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
    }
}
