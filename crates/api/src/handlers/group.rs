//! Handlers for the `/groups` resource (named camper groups such as cabins).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use camp_core::error::CoreError;
use camp_core::schedule::validate_name;
use camp_core::types::DbId;
use camp_db::models::group::{CreateGroup, Group};
use camp_db::repositories::GroupRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/groups
///
/// Member ids are stored as given; ids that do not resolve to a person are
/// skipped when the group is enrolled.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateGroup>,
) -> AppResult<(StatusCode, Json<Group>)> {
    validate_name("name", &input.name)?;
    let group = GroupRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /api/v1/groups
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Group>>> {
    let groups = GroupRepo::list(&state.pool).await?;
    Ok(Json(groups))
}

/// GET /api/v1/groups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Group>> {
    let group = GroupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Group", id }))?;
    Ok(Json(group))
}

/// DELETE /api/v1/groups/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if GroupRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Group", id }))
    }
}
