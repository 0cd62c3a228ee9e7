//! Handlers for the caller's `/cart`.
//!
//! Every mutation is scoped to the authenticated user's cart; an item id
//! from someone else's cart behaves exactly like a missing one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bely_core::cart::{validate_quantity, DEFAULT_ADD_QUANTITY};
use bely_core::error::CoreError;
use bely_core::types::DbId;
use bely_db::models::cart::{AddCartItem, CartView, UpdateCartItem};
use bely_db::repositories::{CartRepo, ProductRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn item_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "CartItem",
        id,
    }
}

async fn load_view(state: &AppState, user_id: DbId) -> AppResult<CartView> {
    let cart = CartRepo::get_or_create(&state.pool, user_id).await?;
    let items = CartRepo::list_items(&state.pool, cart.id).await?;
    Ok(CartView::build(&cart, items))
}

/// GET /api/v1/cart
///
/// The caller's cart with priced lines and total. Created on first access.
pub async fn view(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<CartView>> {
    Ok(Json(load_view(&state, auth_user.user_id).await?))
}

/// POST /api/v1/cart/items
///
/// Add a product; adding one already in the cart increases its quantity.
pub async fn add_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<AddCartItem>,
) -> AppResult<(StatusCode, Json<CartView>)> {
    let quantity = validate_quantity(input.quantity.unwrap_or(DEFAULT_ADD_QUANTITY))?;

    if ProductRepo::find_by_id(&state.pool, input.product_id)
        .await?
        .is_none()
    {
        return Err(CoreError::NotFound {
            entity: "Product",
            id: input.product_id,
        }
        .into());
    }

    let cart = CartRepo::get_or_create(&state.pool, auth_user.user_id).await?;
    let item = CartRepo::add_item(&state.pool, cart.id, input.product_id, quantity).await?;
    tracing::info!(
        user_id = auth_user.user_id,
        product_id = input.product_id,
        quantity = item.quantity,
        "Cart item added"
    );

    let items = CartRepo::list_items(&state.pool, cart.id).await?;
    Ok((StatusCode::CREATED, Json(CartView::build(&cart, items))))
}

/// PUT /api/v1/cart/items/{id}
///
/// Set an item's quantity.
pub async fn update_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCartItem>,
) -> AppResult<Json<CartView>> {
    let quantity = validate_quantity(input.quantity)?;

    CartRepo::update_quantity(&state.pool, auth_user.user_id, id, quantity)
        .await?
        .ok_or_else(|| item_not_found(id))?;

    Ok(Json(load_view(&state, auth_user.user_id).await?))
}

/// DELETE /api/v1/cart/items/{id}
pub async fn remove_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CartView>> {
    if !CartRepo::remove_item(&state.pool, auth_user.user_id, id).await? {
        return Err(item_not_found(id).into());
    }
    Ok(Json(load_view(&state, auth_user.user_id).await?))
}

/// DELETE /api/v1/cart
///
/// Remove every item. Returns 204 No Content.
pub async fn clear(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let removed = CartRepo::clear(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, removed, "Cart cleared");
    Ok(StatusCode::NO_CONTENT)
}
