//! Handlers for the `/people` resource (campers).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use camp_core::error::CoreError;
use camp_core::schedule::validate_name;
use camp_core::types::DbId;
use camp_db::models::person::{CreatePerson, Person, UpdatePerson};
use camp_db::repositories::PersonRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/people
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<Person>)> {
    validate_name("name", &input.name)?;
    let person = PersonRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// GET /api/v1/people
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Person>>> {
    let people = PersonRepo::list(&state.pool).await?;
    Ok(Json(people))
}

/// GET /api/v1/people/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Person>> {
    let person = PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id,
        }))?;
    Ok(Json(person))
}

/// PUT /api/v1/people/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePerson>,
) -> AppResult<Json<Person>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let person = PersonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id,
        }))?;
    Ok(Json(person))
}

/// DELETE /api/v1/people/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if PersonRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id,
        }))
    }
}
