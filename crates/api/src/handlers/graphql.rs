//! Handler for `POST /graphql`.

use axum::extract::State;
use axum::Json;

use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

/// POST /api/v1/graphql
///
/// Executes one GraphQL request. Errors are reported in the response body
/// with HTTP 200, as GraphQL clients expect.
pub async fn execute(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let request = match user {
        Some(user) => request.data(user),
        None => request,
    };
    Json(state.schema.execute(request).await)
}
