//! Handlers for the `/literary-works` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bely_core::catalog::validate_title;
use bely_core::content::{ContentKind, ContentTarget};
use bely_core::error::CoreError;
use bely_core::types::DbId;
use bely_db::models::literary_work::{CreateLiteraryWork, LiteraryWork, UpdateLiteraryWork};
use bely_db::repositories::LiteraryWorkRepo;

use crate::error::AppResult;
use crate::handlers::feedback::{load_feedback, WithFeedback};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "LiteraryWork",
        id,
    }
}

/// POST /api/v1/literary-works
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(mut input): Json<CreateLiteraryWork>,
) -> AppResult<(StatusCode, Json<LiteraryWork>)> {
    input.title = validate_title(&input.title)?;

    let work = LiteraryWorkRepo::create(&state.pool, &input).await?;
    tracing::info!(literary_work_id = work.id, "Literary work created");
    Ok((StatusCode::CREATED, Json(work)))
}

/// GET /api/v1/literary-works
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<LiteraryWork>>>> {
    let (limit, offset) = params.resolve();
    let works = LiteraryWorkRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: works }))
}

/// GET /api/v1/literary-works/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<WithFeedback<LiteraryWork>>> {
    let work = LiteraryWorkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let feedback =
        load_feedback(&state.pool, ContentTarget::new(ContentKind::LiteraryWork, id)).await?;
    Ok(Json(WithFeedback {
        item: work,
        feedback,
    }))
}

/// PUT /api/v1/literary-works/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateLiteraryWork>,
) -> AppResult<Json<LiteraryWork>> {
    if let Some(title) = input.title.as_mut() {
        *title = validate_title(title)?;
    }
    let work = LiteraryWorkRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(work))
}

/// DELETE /api/v1/literary-works/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LiteraryWorkRepo::delete(&state.pool, id).await? {
        tracing::info!(literary_work_id = id, "Literary work deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id).into())
    }
}
