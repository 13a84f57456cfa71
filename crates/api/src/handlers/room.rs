//! Handlers for the `/rooms` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use camp_core::error::CoreError;
use camp_core::schedule::{validate_capacity, validate_name};
use camp_core::types::DbId;
use camp_db::models::room::{CreateRoom, Room, UpdateRoom};
use camp_db::repositories::RoomRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/rooms
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    validate_name("name", &input.name)?;
    validate_capacity(input.capacity)?;

    let room = RoomRepo::create(&state.pool, &input).await?;
    tracing::info!(room_id = room.id, "Room created");
    Ok((StatusCode::CREATED, Json(room)))
}

/// GET /api/v1/rooms
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = RoomRepo::list(&state.pool).await?;
    Ok(Json(rooms))
}

/// GET /api/v1/rooms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Room>> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))?;
    Ok(Json(room))
}

/// PUT /api/v1/rooms/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<Json<Room>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    if let Some(capacity) = input.capacity {
        validate_capacity(capacity)?;
    }

    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))?;
    Ok(Json(room))
}

/// DELETE /api/v1/rooms/{id}
///
/// A room still referenced by an event cannot be deleted (409).
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if RoomRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Room", id }))
    }
}
