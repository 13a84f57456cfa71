//! Handlers for enrolling campers into events.
//!
//! Every request loads a fresh [`ScheduleSnapshot`](camp_core::schedule::ScheduleSnapshot)
//! from the database and drives an [`EnrollmentCoordinator`] over it, so the
//! guard always sees the current bookings and the returned audit reflects
//! the write that was just made.

use axum::extract::{Path, State};
use axum::Json;
use camp_core::error::CoreError;
use camp_core::schedule::{Event, Person};
use camp_core::types::DbId;
use camp_core::{BulkEnrollmentSummary, Conflict, EnrollmentCoordinator, EnrollmentDecision};
use camp_db::{load_snapshot, PgEnrollmentStore};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /events/{id}/enrollments/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkEnrollRequest {
    pub person_ids: Vec<DbId>,
}

/// Event state and schedule audit after a single enroll or unenroll.
#[derive(Debug, Serialize)]
pub struct EnrollmentOutcome {
    pub event: Event,
    pub conflicts: Vec<Conflict>,
}

/// Bulk summary plus the schedule audit after the batch.
#[derive(Debug, Serialize)]
pub struct BulkEnrollmentOutcome {
    #[serde(flatten)]
    pub summary: BulkEnrollmentSummary,
    pub conflicts: Vec<Conflict>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/enrollment-check/{person_id}
pub async fn check(
    State(state): State<AppState>,
    Path((event_id, person_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<EnrollmentDecision>>> {
    let coordinator = load_coordinator(&state).await?;
    let decision = coordinator.check(event_id, person_id)?;
    Ok(Json(DataResponse { data: decision }))
}

/// POST /api/v1/events/{id}/enrollments/{person_id}
///
/// A guard rejection returns 409 with the guard's reason as the error message.
pub async fn enroll(
    State(state): State<AppState>,
    Path((event_id, person_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<EnrollmentOutcome>>> {
    let mut coordinator = load_coordinator(&state).await?;
    coordinator.enroll(event_id, person_id).await?;
    Ok(Json(DataResponse {
        data: outcome(&coordinator, event_id)?,
    }))
}

/// DELETE /api/v1/events/{id}/enrollments/{person_id}
pub async fn unenroll(
    State(state): State<AppState>,
    Path((event_id, person_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<EnrollmentOutcome>>> {
    let mut coordinator = load_coordinator(&state).await?;
    coordinator.unenroll(event_id, person_id).await?;
    Ok(Json(DataResponse {
        data: outcome(&coordinator, event_id)?,
    }))
}

/// POST /api/v1/events/{id}/enrollments/bulk
///
/// Every id must name an existing person (400 otherwise). Repeated ids are
/// considered once. Individual candidates failing does not fail the request.
pub async fn bulk_enroll(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<BulkEnrollRequest>,
) -> AppResult<Json<DataResponse<BulkEnrollmentOutcome>>> {
    let mut coordinator = load_coordinator(&state).await?;
    let candidates = resolve_candidates(&coordinator, &input.person_ids)?;

    let summary = coordinator.bulk_enroll(event_id, &candidates).await?;
    Ok(Json(DataResponse {
        data: BulkEnrollmentOutcome {
            summary,
            conflicts: coordinator.conflicts().to_vec(),
        },
    }))
}

/// POST /api/v1/events/{id}/enrollments/group/{group_id}
pub async fn enroll_group(
    State(state): State<AppState>,
    Path((event_id, group_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<BulkEnrollmentOutcome>>> {
    let mut coordinator = load_coordinator(&state).await?;
    let summary = coordinator.enroll_group(event_id, group_id).await?;
    Ok(Json(DataResponse {
        data: BulkEnrollmentOutcome {
            summary,
            conflicts: coordinator.conflicts().to_vec(),
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_coordinator(state: &AppState) -> AppResult<EnrollmentCoordinator<PgEnrollmentStore>> {
    let snapshot = load_snapshot(&state.pool).await?;
    Ok(EnrollmentCoordinator::new(
        PgEnrollmentStore::new(state.pool.clone()),
        snapshot,
    ))
}

fn outcome(
    coordinator: &EnrollmentCoordinator<PgEnrollmentStore>,
    event_id: DbId,
) -> AppResult<EnrollmentOutcome> {
    let event = coordinator
        .snapshot()
        .event(event_id)
        .cloned()
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;
    Ok(EnrollmentOutcome {
        event,
        conflicts: coordinator.conflicts().to_vec(),
    })
}

fn resolve_candidates(
    coordinator: &EnrollmentCoordinator<PgEnrollmentStore>,
    person_ids: &[DbId],
) -> AppResult<Vec<Person>> {
    let snapshot = coordinator.snapshot();
    let mut candidates: Vec<Person> = Vec::with_capacity(person_ids.len());
    let mut unknown = Vec::new();

    for &id in person_ids {
        if candidates.iter().any(|p| p.id == id) {
            continue;
        }
        match snapshot.person(id) {
            Some(person) => candidates.push(person.clone()),
            None => unknown.push(id.to_string()),
        }
    }

    if !unknown.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Unknown person ids: {}",
            unknown.join(", ")
        )));
    }
    Ok(candidates)
}
