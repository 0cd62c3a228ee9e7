//! HTTP-level tests for products, articles, places, literary works and
//! author credits.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_writes_require_admin(pool: PgPool) {
    let (_, user_token) = common::create_user(&pool, "visitor", common::USER_ROLE_ID).await;
    let body = json!({ "title": "Jug", "price": "12.00" });

    let anonymous = post_json(common::build_test_app(pool.clone()), "/api/v1/products", body.clone()).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let forbidden =
        post_json_auth(common::build_test_app(pool), "/api/v1/products", body, &user_token).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(forbidden).await["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn product_crud_lifecycle(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let id = common::create_product(&pool, &admin, "Clay jug", "19.99").await;

    let detail = body_json(get(common::build_test_app(pool.clone()), &format!("/api/v1/products/{id}")).await).await;
    assert_eq!(detail["title"], "Clay jug");
    assert_eq!(detail["price"], "19.99");
    assert!(detail["average_rating"].is_null());
    assert_eq!(detail["rating_count"], 0);
    assert_eq!(detail["authors"], json!([]));

    let updated = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/products/{id}"),
        json!({ "price": "24.50" }),
        &admin,
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["price"], "24.50");
    assert_eq!(updated["title"], "Clay jug");

    let deleted = delete_auth(common::build_test_app(pool.clone()), &format!("/api/v1/products/{id}"), &admin).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = get(common::build_test_app(pool), &format!("/api/v1/products/{id}")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn product_validation_failures(pool: PgPool) {
    let admin = common::admin_token(&pool).await;

    let negative = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/products",
        json!({ "title": "Jug", "price": "-1.00" }),
        &admin,
    )
    .await;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

    let blank = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/products",
        json!({ "title": "   ", "price": "1.00" }),
        &admin,
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(blank).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn product_list_filters(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    common::create_product(&pool, &admin, "Linen towel", "8.00").await;
    common::create_product(&pool, &admin, "Linen shirt", "45.00").await;
    common::create_product(&pool, &admin, "Clay bowl", "20.00").await;

    let cheap = body_json(get(common::build_test_app(pool.clone()), "/api/v1/products?max_price=20").await).await;
    assert_eq!(cheap["data"].as_array().unwrap().len(), 2);

    let linen = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/products?q=LINEN&min_price=10").await,
    )
    .await;
    let titles: Vec<&str> = linen["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Linen shirt"]);

    let paged = body_json(get(common::build_test_app(pool.clone()), "/api/v1/products?limit=1&offset=1").await).await;
    assert_eq!(paged["data"].as_array().unwrap().len(), 1);

    let inverted = get(common::build_test_app(pool), "/api/v1/products?min_price=50&max_price=10").await;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn product_statistics(pool: PgPool) {
    let empty = body_json(get(common::build_test_app(pool.clone()), "/api/v1/products/statistics").await).await;
    assert_eq!(empty["product_count"], 0);
    assert!(empty["average_price"].is_null());

    let admin = common::admin_token(&pool).await;
    common::create_product(&pool, &admin, "Cup", "10.00").await;
    common::create_product(&pool, &admin, "Vase", "40.00").await;

    let stats = body_json(get(common::build_test_app(pool), "/api/v1/products/statistics").await).await;
    assert_eq!(stats["product_count"], 2);
    assert_eq!(stats["min_price"], "10.00");
    assert_eq!(stats["max_price"], "40.00");
    assert_eq!(stats["average_price"], "25.00");
    assert_eq!(stats["rating_count"], 0);
}

// ---------------------------------------------------------------------------
// Sheets and author credits
// ---------------------------------------------------------------------------

async fn create_author(pool: &PgPool, admin: &str, name: &str) -> i64 {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/authors",
        json!({ "name": name }),
        admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn author_credit_attach_replace_detach(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let product = common::create_product(&pool, &admin, "Jug", "12.00").await;
    let author = create_author(&pool, &admin, "Vera Glinka").await;
    let uri = format!("/api/v1/products/{product}/authors");

    put_json_auth(common::build_test_app(pool.clone()), &uri, json!({ "author_id": author, "role": "potter" }), &admin).await;
    let replaced = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "author_id": author, "role": "glazer" }),
        &admin,
    )
    .await;
    assert_eq!(replaced.status(), StatusCode::OK);
    let credits = body_json(replaced).await;
    assert_eq!(credits["data"].as_array().unwrap().len(), 1);
    assert_eq!(credits["data"][0]["role"], "glazer");
    assert_eq!(credits["data"][0]["name"], "Vera Glinka");

    let unknown_author = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "author_id": 999_999 }),
        &admin,
    )
    .await;
    assert_eq!(unknown_author.status(), StatusCode::NOT_FOUND);

    let detached = delete_auth(common::build_test_app(pool.clone()), &format!("{uri}/{author}"), &admin).await;
    assert_eq!(detached.status(), StatusCode::NO_CONTENT);

    let again = delete_auth(common::build_test_app(pool), &format!("{uri}/{author}"), &admin).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn single_sheet_contains_authors_and_feedback(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let product = common::create_product(&pool, &admin, "Jug", "12.00").await;
    let author = create_author(&pool, &admin, "Vera Glinka").await;
    put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/products/{product}/authors"),
        json!({ "author_id": author, "role": "potter" }),
        &admin,
    )
    .await;

    let response = get(common::build_test_app(pool), &format!("/api/v1/products/{product}/sheet")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let sheet = body_json(response).await;
    assert_eq!(sheet["product_id"], product);
    assert_eq!(sheet["price"], "12.00");
    assert_eq!(sheet["authors"][0]["role"], "potter");
    assert_eq!(sheet["rating_count"], 0);
    assert!(sheet["generated_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_sheets_keep_request_order_and_dedup(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let first = common::create_product(&pool, &admin, "First", "1.00").await;
    let second = common::create_product(&pool, &admin, "Second", "2.00").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/products/sheets",
        json!({ "product_ids": [second, first, second] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let sheets = body_json(response).await;
    let titles: Vec<&str> = sheets["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_sheets_reject_missing_and_oversized(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let product = common::create_product(&pool, &admin, "Only", "1.00").await;

    let missing = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/products/sheets",
        json!({ "product_ids": [product, 424_242] }),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let too_many: Vec<i64> = (1..=51).collect();
    let oversized = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/products/sheets",
        json!({ "product_ids": too_many }),
    )
    .await;
    assert_eq!(oversized.status(), StatusCode::BAD_REQUEST);

    let empty = post_json(
        common::build_test_app(pool),
        "/api/v1/products/sheets",
        json!({ "product_ids": [] }),
    )
    .await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn article_slug_is_derived_and_resolvable(pool: PgPool) {
    let admin = common::admin_token(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/articles",
        json!({ "title": "Белый лён", "content": "О льне." }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let article = body_json(response).await;
    assert_eq!(article["slug"], "belyy-len");

    let by_slug = get(common::build_test_app(pool.clone()), "/api/v1/articles/slug/belyy-len").await;
    assert_eq!(by_slug.status(), StatusCode::OK);
    let by_slug = body_json(by_slug).await;
    assert_eq!(by_slug["id"], article["id"]);
    assert_eq!(by_slug["comments"], json!([]));

    let missing = get(common::build_test_app(pool), "/api/v1/articles/slug/no-such-article").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_article_slug_is_a_conflict(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let body = json!({ "title": "Spring fair", "content": "..." });

    let first = post_json_auth(common::build_test_app(pool.clone()), "/api/v1/articles", body.clone(), &admin).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(common::build_test_app(pool), "/api/v1/articles", body, &admin).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn explicit_invalid_slug_is_rejected(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/articles",
        json!({ "title": "Fair", "slug": "Not A Slug", "content": "..." }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Places and literary works
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn place_and_literary_work_round_trip(pool: PgPool) {
    let admin = common::admin_token(&pool).await;

    let place = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/places",
        json!({ "title": "Workshop", "address": "Linen st. 4" }),
        &admin,
    )
    .await;
    assert_eq!(place.status(), StatusCode::CREATED);
    let place_id = body_json(place).await["id"].as_i64().unwrap();

    let work = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/literary-works",
        json!({ "title": "Poem", "content": "Lines" }),
        &admin,
    )
    .await;
    assert_eq!(work.status(), StatusCode::CREATED);
    let work_id = body_json(work).await["id"].as_i64().unwrap();

    let place = body_json(get(common::build_test_app(pool.clone()), &format!("/api/v1/places/{place_id}")).await).await;
    assert_eq!(place["address"], "Linen st. 4");
    assert_eq!(place["rating_count"], 0);

    let works = body_json(get(common::build_test_app(pool.clone()), "/api/v1/literary-works").await).await;
    assert_eq!(works["data"][0]["id"], work_id);

    let deleted = delete_auth(common::build_test_app(pool), &format!("/api/v1/places/{place_id}"), &admin).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_names_are_stored_trimmed(pool: PgPool) {
    let admin = common::admin_token(&pool).await;

    let product = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/products",
        json!({ "title": "  Linen scarf \n", "price": "5.00" }),
        &admin,
    )
    .await;
    assert_eq!(product.status(), StatusCode::CREATED);
    let product = body_json(product).await;
    assert_eq!(product["title"], "Linen scarf");

    let renamed = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/products/{}", product["id"]),
        json!({ "title": " Scarf " }),
        &admin,
    )
    .await;
    assert_eq!(body_json(renamed).await["title"], "Scarf");

    let author = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/authors",
        json!({ "name": "\tAnna Belaya " }),
        &admin,
    )
    .await;
    assert_eq!(body_json(author).await["name"], "Anna Belaya");

    let place = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/places",
        json!({ "title": " Workshop ", "address": " Linen st. 4 " }),
        &admin,
    )
    .await;
    let place = body_json(place).await;
    assert_eq!(place["title"], "Workshop");
    assert_eq!(place["address"], "Linen st. 4");

    let work = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/literary-works",
        json!({ "title": "  Poem", "content": "Lines" }),
        &admin,
    )
    .await;
    assert_eq!(body_json(work).await["title"], "Poem");
}
