use axum::routing::get;
use axum::Router;

use crate::handlers::literary_work;
use crate::state::AppState;

/// Routes mounted at `/literary-works`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(literary_work::list).post(literary_work::create))
        .route(
            "/{id}",
            get(literary_work::get_by_id)
                .put(literary_work::update)
                .delete(literary_work::delete),
        )
}
