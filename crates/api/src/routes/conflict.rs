//! Route definitions for the schedule audit.

use axum::routing::get;
use axum::Router;

use crate::handlers::conflict;
use crate::state::AppState;

/// Routes mounted at `/conflicts`.
///
/// ```text
/// GET    /          -> list (optional ?kind=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(conflict::list))
}
