//! Handler for the schedule audit.

use axum::extract::{Query, State};
use axum::Json;
use camp_core::{detect_conflicts, Conflict, ConflictKind};
use camp_db::load_snapshot;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /conflicts`.
#[derive(Debug, Deserialize)]
pub struct ConflictQuery {
    /// Only return conflicts of this type (e.g. `room_overcapacity`).
    pub kind: Option<ConflictKind>,
}

/// GET /api/v1/conflicts
///
/// Runs the full audit over the current schedule. Conflicts are derived on
/// every call and never stored.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ConflictQuery>,
) -> AppResult<Json<DataResponse<Vec<Conflict>>>> {
    let snapshot = load_snapshot(&state.pool).await?;
    let mut conflicts = detect_conflicts(
        &snapshot.events,
        &snapshot.people,
        &snapshot.staff,
        &snapshot.rooms,
    );
    if let Some(kind) = params.kind {
        conflicts.retain(|c| c.kind() == kind);
    }

    tracing::debug!(count = conflicts.len(), "Schedule audit served");
    Ok(Json(DataResponse { data: conflicts }))
}
