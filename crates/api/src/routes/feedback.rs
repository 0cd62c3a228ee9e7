//! Route definitions for ratings and comments on content targets.

use axum::routing::get;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Routes mounted at `/feedback`.
///
/// ```text
/// GET, PUT, DELETE  /{target_type}/{target_id}/ratings
/// GET, POST         /{target_type}/{target_id}/comments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{target_type}/{target_id}/ratings",
            get(feedback::list_ratings)
                .put(feedback::rate)
                .delete(feedback::remove_rating),
        )
        .route(
            "/{target_type}/{target_id}/comments",
            get(feedback::list_comments).post(feedback::create_comment),
        )
}
