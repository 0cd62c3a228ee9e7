use axum::routing::put;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Routes mounted at `/comments`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(feedback::update_comment).delete(feedback::delete_comment),
    )
}
