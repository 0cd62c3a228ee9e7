use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET, POST          /
/// GET                /statistics
/// POST               /sheets
/// GET, PUT, DELETE   /{id}
/// GET                /{id}/sheet
/// GET, PUT           /{id}/authors
/// DELETE             /{id}/authors/{author_id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route("/statistics", get(product::statistics))
        .route("/sheets", post(product::sheets))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route("/{id}/sheet", get(product::sheet))
        .route(
            "/{id}/authors",
            get(product::list_authors).put(product::attach_author),
        )
        .route("/{id}/authors/{author_id}", delete(product::detach_author))
}
