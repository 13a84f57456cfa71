//! Persistence seam for enrollment writes.
//!
//! The coordinator never talks to a database directly. It persists through an
//! [`EnrollmentStore`]; `camp-db` provides the PostgreSQL implementation and
//! [`MemoryEnrollmentStore`] keeps everything in process (tests, demos, and
//! running without a database).

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::DbId;

/// Async persistence for the event/camper association.
///
/// Implementations must be idempotent: persisting an existing enrollment or
/// removing a missing one is not an error.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Record that `person_id` is enrolled in `event_id`.
    async fn persist_enrollment(&self, event_id: DbId, person_id: DbId) -> Result<(), CoreError>;

    /// Remove the enrollment of `person_id` from `event_id`.
    async fn remove_enrollment(&self, event_id: DbId, person_id: DbId) -> Result<(), CoreError>;
}

// ---------------------------------------------------------------------------
// MemoryEnrollmentStore
// ---------------------------------------------------------------------------

/// In-memory store backed by a set of `(event_id, person_id)` pairs.
///
/// Writes for people registered via [`MemoryEnrollmentStore::failing_for`]
/// return `CoreError::Internal`, which lets tests exercise storage failures.
#[derive(Debug, Default)]
pub struct MemoryEnrollmentStore {
    enrollments: Mutex<BTreeSet<(DbId, DbId)>>,
    failing_people: HashSet<DbId>,
    writes: AtomicUsize,
}

impl MemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing enrollments.
    pub fn with_enrollments(pairs: impl IntoIterator<Item = (DbId, DbId)>) -> Self {
        Self {
            enrollments: Mutex::new(pairs.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Make every write concerning `person_id` fail.
    pub fn failing_for(mut self, person_id: DbId) -> Self {
        self.failing_people.insert(person_id);
        self
    }

    pub fn contains(&self, event_id: DbId, person_id: DbId) -> bool {
        self.enrollments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(event_id, person_id))
    }

    /// All stored pairs, ordered by `(event_id, person_id)`.
    pub fn enrollments(&self) -> Vec<(DbId, DbId)> {
        self.enrollments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    /// Number of write calls received, including failed ones.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_failure(&self, person_id: DbId) -> Result<(), CoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.failing_people.contains(&person_id) {
            return Err(CoreError::Internal(format!(
                "storage unavailable for person {person_id}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl EnrollmentStore for MemoryEnrollmentStore {
    async fn persist_enrollment(&self, event_id: DbId, person_id: DbId) -> Result<(), CoreError> {
        self.check_failure(person_id)?;
        self.enrollments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((event_id, person_id));
        Ok(())
    }

    async fn remove_enrollment(&self, event_id: DbId, person_id: DbId) -> Result<(), CoreError> {
        self.check_failure(person_id)?;
        self.enrollments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(event_id, person_id));
        Ok(())
    }
}
