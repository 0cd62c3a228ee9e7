use axum::routing::get;
use axum::Router;

use crate::handlers::place;
use crate::state::AppState;

/// Routes mounted at `/places`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(place::list).post(place::create))
        .route(
            "/{id}",
            get(place::get_by_id).put(place::update).delete(place::delete),
        )
}
