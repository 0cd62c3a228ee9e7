//! Handlers for the `/places` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bely_core::catalog::{validate_required_text, validate_title, MAX_ADDRESS_LENGTH};
use bely_core::content::{ContentKind, ContentTarget};
use bely_core::error::CoreError;
use bely_core::types::DbId;
use bely_db::models::place::{CreatePlace, Place, UpdatePlace};
use bely_db::repositories::PlaceRepo;

use crate::error::AppResult;
use crate::handlers::feedback::{load_feedback, WithFeedback};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Place",
        id,
    }
}

/// POST /api/v1/places
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(mut input): Json<CreatePlace>,
) -> AppResult<(StatusCode, Json<Place>)> {
    input.title = validate_title(&input.title)?;
    input.address = validate_required_text("Address", &input.address, MAX_ADDRESS_LENGTH)?;

    let place = PlaceRepo::create(&state.pool, &input).await?;
    tracing::info!(place_id = place.id, "Place created");
    Ok((StatusCode::CREATED, Json(place)))
}

/// GET /api/v1/places
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Place>>>> {
    let (limit, offset) = params.resolve();
    let places = PlaceRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: places }))
}

/// GET /api/v1/places/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<WithFeedback<Place>>> {
    let place = PlaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let feedback = load_feedback(&state.pool, ContentTarget::new(ContentKind::Place, id)).await?;
    Ok(Json(WithFeedback {
        item: place,
        feedback,
    }))
}

/// PUT /api/v1/places/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePlace>,
) -> AppResult<Json<Place>> {
    if let Some(title) = input.title.as_mut() {
        *title = validate_title(title)?;
    }
    if let Some(address) = input.address.as_mut() {
        *address = validate_required_text("Address", address, MAX_ADDRESS_LENGTH)?;
    }

    let place = PlaceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(place))
}

/// DELETE /api/v1/places/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PlaceRepo::delete(&state.pool, id).await? {
        tracing::info!(place_id = id, "Place deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id).into())
    }
}
