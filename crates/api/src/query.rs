//! Shared query parameter types for API handlers.

use bely_core::catalog::{
    clamp_limit, clamp_offset, search_pattern, validate_price_range, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
use bely_core::error::CoreError;
use bely_db::models::product::ProductFilter;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)` ready to bind.
    pub fn resolve(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            clamp_offset(self.offset),
        )
    }
}

/// Query parameters for `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Case-insensitive title search.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ProductListParams {
    /// Validate the price range and build a clamped repository filter.
    pub fn into_filter(self) -> Result<ProductFilter, CoreError> {
        validate_price_range(self.min_price, self.max_price)?;
        Ok(ProductFilter {
            min_price: self.min_price,
            max_price: self.max_price,
            title_pattern: search_pattern(self.q.as_deref()),
            limit: clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            offset: clamp_offset(self.offset),
        })
    }
}
