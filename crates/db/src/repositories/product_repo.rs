//! Repository for the `products` table.

use bely_core::content::{ContentKind, ContentTarget};
use bely_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{
    CreateProduct, Product, ProductFilter, ProductStatistics, UpdateProduct,
};
use crate::repositories::ContentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, price, image_path, description, average_rating, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (title, price, image_path, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.title)
            .bind(input.price)
            .bind(&input.image_path)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find every product whose ID is in `ids`. Missing IDs are skipped.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Product>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List products matching `filter`, newest first.
    pub async fn list(pool: &PgPool, filter: &ProductFilter) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1::numeric IS NULL OR price >= $1)
               AND ($2::numeric IS NULL OR price <= $2)
               AND ($3::text IS NULL OR title ILIKE $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(&filter.title_pattern)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                title = COALESCE($2, title),
                price = COALESCE($3, price),
                image_path = COALESCE($4, image_path),
                description = COALESCE($5, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.price)
            .bind(&input.image_path)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product, its ratings and comments. Cart lines and author
    /// credits go with it through foreign-key cascades.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        ContentRepo::delete(pool, ContentTarget::new(ContentKind::Product, id)).await
    }

    /// Catalog-wide price and rating figures.
    pub async fn statistics(pool: &PgPool) -> Result<ProductStatistics, sqlx::Error> {
        sqlx::query_as::<_, ProductStatistics>(
            "SELECT COUNT(*) AS product_count,
                    MIN(price) AS min_price,
                    MAX(price) AS max_price,
                    ROUND(AVG(price), 2) AS average_price,
                    (SELECT COUNT(*) FROM ratings WHERE target_type = 'product') AS rating_count
             FROM products",
        )
        .fetch_one(pool)
        .await
    }
}
