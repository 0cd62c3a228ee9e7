//! Product entity model, DTOs and list filters.

use bely_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub title: String,
    pub price: Decimal,
    pub image_path: Option<String>,
    pub description: String,
    /// Cached mean of the product's ratings; `None` while unrated.
    pub average_rating: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub title: String,
    pub price: Decimal,
    pub image_path: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub image_path: Option<String>,
    pub description: Option<String>,
}

/// Validated, clamped filter for product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Ready-made `ILIKE` pattern for the title.
    pub title_pattern: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Aggregate figures over the whole product catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductStatistics {
    pub product_count: i64,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub average_price: Option<Decimal>,
    pub rating_count: i64,
}
