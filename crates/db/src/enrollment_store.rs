//! PostgreSQL-backed [`EnrollmentStore`].

use async_trait::async_trait;
use camp_core::error::CoreError;
use camp_core::store::EnrollmentStore;
use camp_core::types::DbId;

use crate::repositories::EnrollmentRepo;
use crate::DbPool;

/// Persists enrollments into `event_enrollments`.
///
/// Cheap to clone; holds only the pool handle.
#[derive(Debug, Clone)]
pub struct PgEnrollmentStore {
    pool: DbPool,
}

impl PgEnrollmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentStore for PgEnrollmentStore {
    async fn persist_enrollment(&self, event_id: DbId, person_id: DbId) -> Result<(), CoreError> {
        EnrollmentRepo::insert(&self.pool, event_id, person_id)
            .await
            .map_err(|e| {
                tracing::error!(event_id, person_id, error = %e, "Failed to persist enrollment");
                CoreError::Internal(format!("failed to persist enrollment: {e}"))
            })?;
        Ok(())
    }

    async fn remove_enrollment(&self, event_id: DbId, person_id: DbId) -> Result<(), CoreError> {
        EnrollmentRepo::delete(&self.pool, event_id, person_id)
            .await
            .map_err(|e| {
                tracing::error!(event_id, person_id, error = %e, "Failed to remove enrollment");
                CoreError::Internal(format!("failed to remove enrollment: {e}"))
            })?;
        Ok(())
    }
}
