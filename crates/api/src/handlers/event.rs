//! Handlers for the `/events` resource.
//!
//! Enrollment is not writable through these handlers; `enrolled_person_ids`
//! on the returned rows is aggregated from `event_enrollments` and changes
//! only through the enrollment endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use camp_core::error::CoreError;
use camp_core::schedule::{validate_capacity, validate_event_window, validate_name};
use camp_core::types::DbId;
use camp_db::models::event::{CreateEvent, Event, UpdateEvent};
use camp_db::repositories::{EventRepo, RoomRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/events
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    validate_name("title", &input.title)?;
    validate_event_window(input.starts_at, input.ends_at)?;
    validate_capacity(input.capacity)?;
    ensure_room_exists(&state, input.room_id).await?;

    let event = EventRepo::create(&state.pool, &input).await?;
    tracing::info!(event_id = event.id, room_id = event.room_id, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(events))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(event))
}

/// PUT /api/v1/events/{id}
///
/// The time window is validated after merging the update into the stored
/// event, so moving only the start past the existing end is rejected.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    if let Some(title) = &input.title {
        validate_name("title", title)?;
    }
    if let Some(capacity) = input.capacity {
        validate_capacity(capacity)?;
    }
    validate_event_window(
        input.starts_at.unwrap_or(existing.starts_at),
        input.ends_at.unwrap_or(existing.ends_at),
    )?;
    if let Some(room_id) = input.room_id {
        if room_id != existing.room_id {
            ensure_room_exists(&state, room_id).await?;
        }
    }

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(event))
}

/// DELETE /api/v1/events/{id}
///
/// Enrollments of the event are removed with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if EventRepo::delete(&state.pool, id).await? {
        tracing::info!(event_id = id, "Event deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Event", id }))
    }
}

async fn ensure_room_exists(state: &AppState, room_id: DbId) -> AppResult<()> {
    RoomRepo::find_by_id(&state.pool, room_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        }))
}
