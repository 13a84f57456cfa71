//! HTTP-level tests for the enrollment endpoints.
//!
//! Requires `DATABASE_URL`; run with `cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_event, create_person, create_room, delete, get, post, post_json};
use sqlx::PgPool;

/// Archery (9-10, capacity given) and Swimming (9-11) in separate rooms,
/// with Ben already enrolled in Swimming.
struct Camp {
    archery: i64,
    swimming: i64,
    ada: i64,
    ben: i64,
    cleo: i64,
}

async fn seed(pool: &PgPool, archery_capacity: i32) -> Camp {
    let range = create_room(pool, "Range", 20).await;
    let lake = create_room(pool, "Lake", 20).await;
    let archery = create_event(pool, range, "Archery", (9, 10), archery_capacity).await;
    let swimming = create_event(pool, lake, "Swimming", (9, 11), 10).await;
    let ada = create_person(pool, "Ada").await;
    let ben = create_person(pool, "Ben").await;
    let cleo = create_person(pool, "Cleo").await;

    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{swimming}/enrollments/{ben}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    Camp {
        archery,
        swimming,
        ada,
        ben,
        cleo,
    }
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn enroll_returns_event_and_audit(pool: PgPool) {
    let camp = seed(&pool, 5).await;

    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/events/{}/enrollments/{}", camp.archery, camp.ada),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["event"]["enrolled_person_ids"], serde_json::json!([camp.ada]));
    assert_eq!(json["data"]["conflicts"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn enroll_double_booked_camper_is_409_with_reason(pool: PgPool) {
    let camp = seed(&pool, 5).await;

    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{}/enrollments/{}", camp.archery, camp.ben),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("Swimming"));

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/events/{}", camp.archery),
    )
    .await;
    assert_eq!(body_json(response).await["enrolled_person_ids"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn enroll_into_full_event_reports_capacity(pool: PgPool) {
    let camp = seed(&pool, 1).await;
    post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{}/enrollments/{}", camp.archery, camp.ada),
    )
    .await;

    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/events/{}/enrollments/{}", camp.archery, camp.cleo),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Event is at full capacity");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn enroll_unknown_event_is_404(pool: PgPool) {
    let camp = seed(&pool, 5).await;
    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/events/999999/enrollments/{}", camp.ada),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn check_does_not_write(pool: PgPool) {
    let camp = seed(&pool, 5).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{}/enrollment-check/{}", camp.archery, camp.ben),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["can_enroll"], false);
    assert!(json["data"]["reason"].as_str().unwrap().contains("Swimming"));

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/events/{}/enrollment-check/{}", camp.archery, camp.ada),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!({ "can_enroll": true }));
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn unenroll_removes_camper(pool: PgPool) {
    let camp = seed(&pool, 5).await;

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/events/{}/enrollments/{}", camp.swimming, camp.ben),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["event"]["enrolled_person_ids"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn bulk_enroll_reports_partial_success(pool: PgPool) {
    let camp = seed(&pool, 3).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{}/enrollments/bulk", camp.archery),
        serde_json::json!({ "person_ids": [camp.ada, camp.ben, camp.cleo] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["enrolled"], 2);
    assert_eq!(data["total"], 3);
    let errors = data["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().starts_with("Ben: "));
    assert!(data["message"].as_str().unwrap().contains("2 of 3"));

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/events/{}", camp.archery),
    )
    .await;
    let mut enrolled: Vec<i64> = body_json(response).await["enrolled_person_ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    enrolled.sort_unstable();
    let mut expected = vec![camp.ada, camp.cleo];
    expected.sort_unstable();
    assert_eq!(enrolled, expected);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn bulk_enroll_rejects_unknown_person_ids(pool: PgPool) {
    let camp = seed(&pool, 3).await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/events/{}/enrollments/bulk", camp.archery),
        serde_json::json!({ "person_ids": [camp.ada, 999_999] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("999999"));
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn group_enroll_skips_dangling_members(pool: PgPool) {
    let camp = seed(&pool, 5).await;
    let group = common::create(
        &pool,
        "/api/v1/groups",
        serde_json::json!({
            "name": "Cabin 2",
            "member_ids": [camp.ada, camp.ben, 999_999],
        }),
    )
    .await;

    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/events/{}/enrollments/group/{group}", camp.archery),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["enrolled"], 1);
}
