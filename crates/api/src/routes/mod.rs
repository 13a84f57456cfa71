pub mod conflict;
pub mod event;
pub mod group;
pub mod health;
pub mod person;
pub mod room;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /rooms                                          list, create
/// /rooms/{id}                                     get, update, delete
///
/// /people                                         list, create
/// /people/{id}                                    get, update, delete
///
/// /staff                                          list, create
/// /staff/{id}                                     get, update, delete
///
/// /groups                                         list, create
/// /groups/{id}                                    get, delete
///
/// /events                                         list, create
/// /events/{id}                                    get, update, delete
/// /events/{id}/enrollment-check/{person_id}       guard decision (GET)
/// /events/{id}/enrollments/bulk                   bulk enroll (POST)
/// /events/{id}/enrollments/group/{group_id}       group enroll (POST)
/// /events/{id}/enrollments/{person_id}            enroll (POST), unenroll (DELETE)
///
/// /conflicts                                      full schedule audit (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/rooms", room::router())
        .nest("/people", person::router())
        .nest("/staff", staff::router())
        .nest("/groups", group::router())
        .nest("/events", event::router())
        .nest("/conflicts", conflict::router())
}
