#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use bely_api::auth::jwt::{generate_access_token, JwtConfig};
use bely_api::auth::password::hash_password;
use bely_api::config::{LogFormat, ServerConfig, DEFAULT_MAX_BODY_BYTES};
use bely_api::router::build_app_router;
use bely_api::state::AppState;
use bely_db::models::user::CreateUser;
use bely_db::repositories::UserRepo;

pub const ADMIN_ROLE_ID: i64 = 1;
pub const USER_ROLE_ID: i64 = 2;
pub const TEST_PASSWORD: &str = "linen-and-clay-42";

/// A `ServerConfig` with a fixed JWT secret and the dev CORS origin.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        database_url: String::new(),
        db_max_connections: 5,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        graphql_depth_limit: 8,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "bely-integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// The production router and middleware stack over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a user and return `(user_id, access_token)`.
pub async fn create_user(pool: &PgPool, username: &str, role_id: i64) -> (i64, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role_id,
        },
    )
    .await
    .expect("user creation should succeed");

    let role = if role_id == ADMIN_ROLE_ID { "admin" } else { "user" };
    let token = generate_access_token(user.id, role, &test_config().jwt)
        .expect("token generation should succeed");
    (user.id, token)
}

pub async fn admin_token(pool: &PgPool) -> String {
    create_user(pool, "admin", ADMIN_ROLE_ID).await.1
}

/// Create a product through the API and return its id.
pub async fn create_product(pool: &PgPool, admin: &str, title: &str, price: &str) -> i64 {
    let body = serde_json::json!({ "title": title, "price": price });
    let response = post_json_auth(build_test_app(pool.clone()), "/api/v1/products", body, admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
