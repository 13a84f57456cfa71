//! Handlers for the `/staff` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use camp_core::error::CoreError;
use camp_core::schedule::validate_name;
use camp_core::types::DbId;
use camp_db::models::staff::{CreateStaffMember, StaffMember, UpdateStaffMember};
use camp_db::repositories::StaffRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/staff
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateStaffMember>,
) -> AppResult<(StatusCode, Json<StaffMember>)> {
    validate_name("name", &input.name)?;
    let member = StaffRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /api/v1/staff
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<StaffMember>>> {
    let staff = StaffRepo::list(&state.pool).await?;
    Ok(Json(staff))
}

/// GET /api/v1/staff/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StaffMember>> {
    let member = StaffRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StaffMember",
            id,
        }))?;
    Ok(Json(member))
}

/// PUT /api/v1/staff/{id}
///
/// `certifications`, when present, replaces the whole list.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStaffMember>,
) -> AppResult<Json<StaffMember>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let member = StaffRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StaffMember",
            id,
        }))?;
    Ok(Json(member))
}

/// DELETE /api/v1/staff/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if StaffRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "StaffMember",
            id,
        }))
    }
}
