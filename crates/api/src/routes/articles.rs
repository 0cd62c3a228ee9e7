use axum::routing::get;
use axum::Router;

use crate::handlers::article;
use crate::state::AppState;

/// Routes mounted at `/articles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(article::list).post(article::create))
        .route("/slug/{slug}", get(article::get_by_slug))
        .route(
            "/{id}",
            get(article::get_by_id)
                .put(article::update)
                .delete(article::delete),
        )
}
