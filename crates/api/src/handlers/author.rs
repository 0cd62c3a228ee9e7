//! Handlers for the `/authors` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bely_core::catalog::{validate_required_text, MAX_TITLE_LENGTH};
use bely_core::error::CoreError;
use bely_core::types::DbId;
use bely_db::models::author::{Author, CreateAuthor, UpdateAuthor};
use bely_db::repositories::AuthorRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

pub(crate) fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Author",
        id,
    }
}

/// POST /api/v1/authors
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(mut input): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    input.name = validate_required_text("Name", &input.name, MAX_TITLE_LENGTH)?;
    let author = AuthorRepo::create(&state.pool, &input).await?;
    tracing::info!(author_id = author.id, "Author created");
    Ok((StatusCode::CREATED, Json(author)))
}

/// GET /api/v1/authors
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Author>>>> {
    let (limit, offset) = params.resolve();
    let authors = AuthorRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: authors }))
}

/// GET /api/v1/authors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Author>> {
    let author = AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(author))
}

/// PUT /api/v1/authors/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    if let Some(name) = input.name.as_mut() {
        *name = validate_required_text("Name", name, MAX_TITLE_LENGTH)?;
    }
    let author = AuthorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(author))
}

/// DELETE /api/v1/authors/{id}
///
/// Product credits of the author are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AuthorRepo::delete(&state.pool, id).await? {
        tracing::info!(author_id = id, "Author deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id).into())
    }
}
