//! Route definitions for the `/groups` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::group;
use crate::state::AppState;

/// Routes mounted at `/groups`. Groups are immutable once created.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(group::list).post(group::create))
        .route("/{id}", get(group::get_by_id).delete(group::delete))
}
