//! Handlers for the `/products` resource, its author credits and sheets.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bely_core::catalog::{validate_price, validate_title, MAX_AUTHOR_ROLE_LENGTH, MAX_SHEET_BATCH};
use bely_core::content::{ContentKind, ContentTarget};
use bely_core::error::CoreError;
use bely_core::types::{DbId, Timestamp};
use bely_db::models::author::{AttachAuthor, ProductAuthorCredit};
use bely_db::models::product::{CreateProduct, Product, ProductStatistics, UpdateProduct};
use bely_db::repositories::{AuthorRepo, ProductRepo};
use bely_db::DbPool;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::author;
use crate::handlers::feedback::{load_feedback, FeedbackBundle};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ProductListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Product",
        id,
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Product detail: the row, its credited authors and its feedback.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub authors: Vec<ProductAuthorCredit>,
    #[serde(flatten)]
    pub feedback: FeedbackBundle,
}

/// Everything a document renderer needs to print one product.
#[derive(Debug, Serialize)]
pub struct ProductSheet {
    pub product_id: DbId,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub image_path: Option<String>,
    pub authors: Vec<ProductAuthorCredit>,
    #[serde(flatten)]
    pub feedback: FeedbackBundle,
    pub generated_at: Timestamp,
}

/// Request body for `POST /products/sheets`.
#[derive(Debug, Deserialize)]
pub struct SheetBatchRequest {
    pub product_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(mut input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    input.title = validate_title(&input.title)?;
    validate_price(input.price)?;

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, price = %product.price, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/products
///
/// Supports `min_price`, `max_price`, `q`, `limit` and `offset`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let filter = params.into_filter()?;
    let products = ProductRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductDetail>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let authors = AuthorRepo::list_for_product(&state.pool, id).await?;
    let feedback = load_feedback(&state.pool, ContentTarget::new(ContentKind::Product, id)).await?;
    Ok(Json(ProductDetail {
        product,
        authors,
        feedback,
    }))
}

/// PUT /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    if let Some(title) = input.title.as_mut() {
        *title = validate_title(title)?;
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(product_id = id, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/v1/products/{id}
///
/// Ratings, comments, cart lines and author credits go with the product.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProductRepo::delete(&state.pool, id).await? {
        tracing::info!(product_id = id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id).into())
    }
}

/// GET /api/v1/products/statistics
pub async fn statistics(State(state): State<AppState>) -> AppResult<Json<ProductStatistics>> {
    let stats = ProductRepo::statistics(&state.pool).await?;
    Ok(Json(stats))
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

async fn build_sheet(pool: &DbPool, product: Product) -> AppResult<ProductSheet> {
    let authors = AuthorRepo::list_for_product(pool, product.id).await?;
    let feedback = load_feedback(pool, ContentTarget::new(ContentKind::Product, product.id)).await?;
    Ok(ProductSheet {
        product_id: product.id,
        title: product.title,
        price: product.price,
        description: product.description,
        image_path: product.image_path,
        authors,
        feedback,
        generated_at: chrono::Utc::now(),
    })
}

/// GET /api/v1/products/{id}/sheet
pub async fn sheet(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductSheet>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(build_sheet(&state.pool, product).await?))
}

/// POST /api/v1/products/sheets
///
/// Sheets for up to 50 products, in request order. Duplicate ids are
/// collapsed; any missing id fails the whole batch with 404.
pub async fn sheets(
    State(state): State<AppState>,
    Json(input): Json<SheetBatchRequest>,
) -> AppResult<Json<DataResponse<Vec<ProductSheet>>>> {
    let mut seen = HashSet::new();
    let ids: Vec<DbId> = input
        .product_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect();

    if ids.is_empty() {
        return Err(CoreError::Validation("product_ids must not be empty".into()).into());
    }
    if ids.len() > MAX_SHEET_BATCH {
        return Err(CoreError::Validation(format!(
            "At most {MAX_SHEET_BATCH} products per batch, got {}",
            ids.len()
        ))
        .into());
    }

    let mut products = ProductRepo::find_many(&state.pool, &ids).await?;
    let mut sheets = Vec::with_capacity(ids.len());
    for id in &ids {
        let pos = products
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| not_found(*id))?;
        let product = products.swap_remove(pos);
        sheets.push(build_sheet(&state.pool, product).await?);
    }
    Ok(Json(DataResponse { data: sheets }))
}

// ---------------------------------------------------------------------------
// Author credits
// ---------------------------------------------------------------------------

/// GET /api/v1/products/{id}/authors
pub async fn list_authors(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProductAuthorCredit>>>> {
    if ProductRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id).into());
    }
    let credits = AuthorRepo::list_for_product(&state.pool, id).await?;
    Ok(Json(DataResponse { data: credits }))
}

/// PUT /api/v1/products/{id}/authors
///
/// Credit an author on the product; re-crediting replaces the role.
pub async fn attach_author(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AttachAuthor>,
) -> AppResult<Json<DataResponse<Vec<ProductAuthorCredit>>>> {
    let role = input.role.trim();
    if role.chars().count() > MAX_AUTHOR_ROLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Role must be at most {MAX_AUTHOR_ROLE_LENGTH} characters"
        ))
        .into());
    }
    if ProductRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id).into());
    }
    if AuthorRepo::find_by_id(&state.pool, input.author_id)
        .await?
        .is_none()
    {
        return Err(author::not_found(input.author_id).into());
    }

    AuthorRepo::attach(&state.pool, id, input.author_id, role).await?;
    tracing::info!(product_id = id, author_id = input.author_id, role, "Author credited");

    let credits = AuthorRepo::list_for_product(&state.pool, id).await?;
    Ok(Json(DataResponse { data: credits }))
}

/// DELETE /api/v1/products/{id}/authors/{author_id}
pub async fn detach_author(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((id, author_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if AuthorRepo::detach(&state.pool, id, author_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "ProductAuthor",
            id: author_id,
        }
        .into())
    }
}
