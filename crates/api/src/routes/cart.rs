use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/cart`. All require authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::view).delete(cart::clear))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{id}",
            put(cart::update_item).delete(cart::remove_item),
        )
}
