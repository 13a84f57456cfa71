//! Route definitions for the `/staff` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::staff;
use crate::state::AppState;

/// Routes mounted at `/staff`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(staff::list).post(staff::create))
        .route(
            "/{id}",
            get(staff::get_by_id).put(staff::update).delete(staff::delete),
        )
}
