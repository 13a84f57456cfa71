#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use camp_api::config::ServerConfig;
use camp_api::router::build_app_router;
use camp_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_max_connections: 5,
    }
}

/// Build the full application router, using the given database pool.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack as the binary.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a resource through the API and return its id.
pub async fn create(pool: &PgPool, uri: &str, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn create_room(pool: &PgPool, name: &str, capacity: i32) -> i64 {
    create(
        pool,
        "/api/v1/rooms",
        serde_json::json!({ "name": name, "capacity": capacity }),
    )
    .await
}

pub async fn create_person(pool: &PgPool, name: &str) -> i64 {
    create(pool, "/api/v1/people", serde_json::json!({ "name": name })).await
}

/// Create an event on 2024-07-05 running from `start` to `end` o'clock UTC.
pub async fn create_event(
    pool: &PgPool,
    room_id: i64,
    title: &str,
    (start, end): (u32, u32),
    capacity: i32,
) -> i64 {
    create(
        pool,
        "/api/v1/events",
        serde_json::json!({
            "title": title,
            "starts_at": format!("2024-07-05T{start:02}:00:00Z"),
            "ends_at": format!("2024-07-05T{end:02}:00:00Z"),
            "room_id": room_id,
            "capacity": capacity,
        }),
    )
    .await
}
