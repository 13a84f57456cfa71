//! Route definitions for the `/events` resource.
//!
//! Also nests the enrollment endpoints under `/events/{id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{enrollment, event};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// GET    /{id}                                    -> get_by_id
/// PUT    /{id}                                    -> update
/// DELETE /{id}                                    -> delete
///
/// GET    /{id}/enrollment-check/{person_id}       -> check
/// POST   /{id}/enrollments/bulk                   -> bulk_enroll
/// POST   /{id}/enrollments/group/{group_id}       -> enroll_group
/// POST   /{id}/enrollments/{person_id}            -> enroll
/// DELETE /{id}/enrollments/{person_id}            -> unenroll
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list).post(event::create))
        .route(
            "/{id}",
            get(event::get_by_id)
                .put(event::update)
                .delete(event::delete),
        )
        .route(
            "/{id}/enrollment-check/{person_id}",
            get(enrollment::check),
        )
        .route("/{id}/enrollments/bulk", post(enrollment::bulk_enroll))
        .route(
            "/{id}/enrollments/group/{group_id}",
            post(enrollment::enroll_group),
        )
        .route(
            "/{id}/enrollments/{person_id}",
            post(enrollment::enroll).delete(enrollment::unenroll),
        )
}
