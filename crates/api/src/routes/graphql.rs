use axum::routing::post;
use axum::Router;

use crate::handlers::graphql;
use crate::state::AppState;

/// Mounts `POST /graphql`.
pub fn router() -> Router<AppState> {
    Router::new().route("/graphql", post(graphql::execute))
}
