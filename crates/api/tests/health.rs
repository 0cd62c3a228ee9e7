//! Integration tests for the health endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_returns_json_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn response_carries_request_id(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header must be present");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
