//! Tests for the GraphQL endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

const ENDPOINT: &str = "/api/v1/graphql";

#[sqlx::test(migrations = "../db/migrations")]
async fn products_query_returns_filtered_catalog(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    common::create_product(&pool, &admin, "Linen towel", "8.00").await;
    common::create_product(&pool, &admin, "Clay bowl", "20.00").await;

    let query = r#"{ products(search: "linen") { id title price averageRating ratingCount authors { name } } }"#;
    let response = post_json(common::build_test_app(pool), ENDPOINT, json!({ "query": query })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json.get("errors").is_none(), "unexpected errors: {json}");
    let products = json["data"]["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["title"], "Linen towel");
    assert_eq!(products[0]["price"], "8.00");
    assert!(products[0]["averageRating"].is_null());
    assert_eq!(products[0]["ratingCount"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inverted_price_range_is_a_validation_error(pool: PgPool) {
    let query = r#"{ products(minPrice: "30", maxPrice: "10") { id } }"#;
    let json = body_json(post_json(common::build_test_app(pool), ENDPOINT, json!({ "query": query })).await).await;
    assert_eq!(json["errors"][0]["extensions"]["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rate_requires_authentication(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let product = common::create_product(&pool, &admin, "Jug", "12.00").await;

    let mutation = format!(r#"mutation {{ rate(targetType: "product", targetId: {product}, value: 4) {{ average count }} }}"#);
    let json = body_json(post_json(common::build_test_app(pool), ENDPOINT, json!({ "query": mutation })).await).await;
    assert_eq!(json["errors"][0]["extensions"]["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rate_with_token_returns_summary(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let (_, user) = common::create_user(&pool, "anna", common::USER_ROLE_ID).await;
    let product = common::create_product(&pool, &admin, "Jug", "12.00").await;

    let mutation = format!(r#"mutation {{ rate(targetType: "product", targetId: {product}, value: 4) {{ average count }} }}"#);
    let json = body_json(
        post_json_auth(common::build_test_app(pool.clone()), ENDPOINT, json!({ "query": mutation }), &user).await,
    )
    .await;
    assert!(json.get("errors").is_none(), "unexpected errors: {json}");
    assert_eq!(json["data"]["rate"]["count"], 1);
    assert_eq!(json["data"]["rate"]["average"], 4.0);

    let query = format!("{{ product(id: {product}) {{ averageRating ratings {{ value username }} }} }}");
    let json = body_json(post_json(common::build_test_app(pool), ENDPOINT, json!({ "query": query })).await).await;
    assert_eq!(json["data"]["product"]["averageRating"], 4.0);
    assert_eq!(json["data"]["product"]["ratings"][0]["username"], "anna");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rate_on_missing_target_is_not_found(pool: PgPool) {
    let (_, user) = common::create_user(&pool, "anna", common::USER_ROLE_ID).await;
    let mutation = r#"mutation { rate(targetType: "place", targetId: 4242, value: 3) { count } }"#;
    let json = body_json(
        post_json_auth(common::build_test_app(pool), ENDPOINT, json!({ "query": mutation }), &user).await,
    )
    .await;
    assert_eq!(json["errors"][0]["extensions"]["code"], "NOT_FOUND");
}
