//! Integration tests for catalog content: products, articles and authors.

use bely_core::catalog::search_pattern;
use bely_db::models::author::CreateAuthor;
use bely_db::models::product::{CreateProduct, ProductFilter};
use bely_db::repositories::{ArticleRepo, AuthorRepo, ProductRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

async fn new_product(pool: &PgPool, title: &str, price: Decimal) -> i64 {
    ProductRepo::create(
        pool,
        &CreateProduct {
            title: title.to_string(),
            price,
            image_path: None,
            description: String::new(),
        },
    )
    .await
    .unwrap()
    .id
}

fn filter() -> ProductFilter {
    ProductFilter {
        limit: 20,
        ..Default::default()
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn product_list_filters_by_price_range(pool: PgPool) {
    new_product(&pool, "Cheap", Decimal::new(500, 2)).await;
    new_product(&pool, "Middle", Decimal::new(1500, 2)).await;
    new_product(&pool, "Dear", Decimal::new(9900, 2)).await;

    let products = ProductRepo::list(
        &pool,
        &ProductFilter {
            min_price: Some(Decimal::new(1000, 2)),
            max_price: Some(Decimal::new(2000, 2)),
            ..filter()
        },
    )
    .await
    .unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Middle");
}

#[sqlx::test(migrations = "./migrations")]
async fn product_list_searches_title_case_insensitively(pool: PgPool) {
    new_product(&pool, "Linen Towel", Decimal::ONE).await;
    new_product(&pool, "Clay Mug", Decimal::ONE).await;

    let products = ProductRepo::list(
        &pool,
        &ProductFilter {
            title_pattern: search_pattern(Some("towel")),
            ..filter()
        },
    )
    .await
    .unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Linen Towel");
}

#[sqlx::test(migrations = "./migrations")]
async fn product_list_honours_limit_and_offset(pool: PgPool) {
    for i in 0..5 {
        new_product(&pool, &format!("Item {i}"), Decimal::ONE).await;
    }

    let page = ProductRepo::list(
        &pool,
        &ProductFilter {
            limit: 2,
            offset: 4,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn find_many_skips_missing_ids(pool: PgPool) {
    let a = new_product(&pool, "A", Decimal::ONE).await;
    let b = new_product(&pool, "B", Decimal::ONE).await;

    let found = ProductRepo::find_many(&pool, &[b, 999_999, a]).await.unwrap();
    let ids: Vec<i64> = found.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[sqlx::test(migrations = "./migrations")]
async fn statistics_on_empty_catalog(pool: PgPool) {
    let stats = ProductRepo::statistics(&pool).await.unwrap();
    assert_eq!(stats.product_count, 0);
    assert_eq!(stats.min_price, None);
    assert_eq!(stats.average_price, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn statistics_aggregate_prices(pool: PgPool) {
    new_product(&pool, "A", Decimal::new(1000, 2)).await;
    new_product(&pool, "B", Decimal::new(2000, 2)).await;
    new_product(&pool, "C", Decimal::new(4500, 2)).await;

    let stats = ProductRepo::statistics(&pool).await.unwrap();
    assert_eq!(stats.product_count, 3);
    assert_eq!(stats.min_price, Some(Decimal::new(1000, 2)));
    assert_eq!(stats.max_price, Some(Decimal::new(4500, 2)));
    assert_eq!(stats.average_price, Some(Decimal::new(2500, 2)));
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_article_slug_violates_unique_constraint(pool: PgPool) {
    ArticleRepo::create(&pool, "Spring", "spring", None, "A").await.unwrap();
    let err = ArticleRepo::create(&pool, "Spring again", "spring", None, "B")
        .await
        .unwrap_err();

    let constraint = err
        .as_database_error()
        .and_then(|e| e.constraint().map(str::to_string));
    assert_eq!(constraint.as_deref(), Some("uq_articles_slug"));
}

#[sqlx::test(migrations = "./migrations")]
async fn article_found_by_slug(pool: PgPool) {
    let created = ArticleRepo::create(&pool, "Spring", "spring", None, "A")
        .await
        .unwrap();
    let found = ArticleRepo::find_by_slug(&pool, "spring").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(ArticleRepo::find_by_slug(&pool, "autumn").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn author_credits_upsert_role_and_cascade(pool: PgPool) {
    let product = new_product(&pool, "Album", Decimal::ONE).await;
    let author = AuthorRepo::create(
        &pool,
        &CreateAuthor {
            name: "Ivan Petrov".to_string(),
            bio: String::new(),
            photo_path: None,
        },
    )
    .await
    .unwrap();

    AuthorRepo::attach(&pool, product, author.id, "illustrator").await.unwrap();
    AuthorRepo::attach(&pool, product, author.id, "writer").await.unwrap();

    let credits = AuthorRepo::list_for_product(&pool, product).await.unwrap();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].role, "writer");

    assert!(AuthorRepo::delete(&pool, author.id).await.unwrap());
    assert!(AuthorRepo::list_for_product(&pool, product).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn detach_reports_missing_credit(pool: PgPool) {
    let product = new_product(&pool, "Album", Decimal::ONE).await;
    assert!(!AuthorRepo::detach(&pool, product, 12345).await.unwrap());
}
