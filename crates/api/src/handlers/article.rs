//! Handlers for the `/articles` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bely_core::catalog::validate_title;
use bely_core::content::{ContentKind, ContentTarget};
use bely_core::error::CoreError;
use bely_core::slug::{resolve_slug, validate_slug};
use bely_core::types::DbId;
use bely_db::models::article::{Article, CreateArticle, UpdateArticle};
use bely_db::repositories::ArticleRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::feedback::{load_feedback, WithFeedback};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Article",
        id,
    }
}

async fn with_feedback(
    state: &AppState,
    article: Article,
) -> AppResult<Json<WithFeedback<Article>>> {
    let target = ContentTarget::new(ContentKind::Article, article.id);
    let feedback = load_feedback(&state.pool, target).await?;
    Ok(Json(WithFeedback {
        item: article,
        feedback,
    }))
}

/// POST /api/v1/articles
///
/// The slug is derived from the title when omitted.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateArticle>,
) -> AppResult<(StatusCode, Json<Article>)> {
    let title = validate_title(&input.title)?;
    let slug = resolve_slug(input.slug.as_deref(), &title)?;

    let article = ArticleRepo::create(
        &state.pool,
        &title,
        &slug,
        input.image_path.as_deref(),
        &input.content,
    )
    .await?;
    tracing::info!(article_id = article.id, slug = %article.slug, user_id = admin.user_id, "Article created");
    Ok((StatusCode::CREATED, Json(article)))
}

/// GET /api/v1/articles
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Article>>>> {
    let (limit, offset) = params.resolve();
    let articles = ArticleRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<WithFeedback<Article>>> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    with_feedback(&state, article).await
}

/// GET /api/v1/articles/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<WithFeedback<Article>>> {
    let article = ArticleRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article with slug '{slug}' not found")))?;
    with_feedback(&state, article).await
}

/// PUT /api/v1/articles/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateArticle>,
) -> AppResult<Json<Article>> {
    if let Some(title) = input.title.as_mut() {
        *title = validate_title(title)?;
    }
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }

    let article = ArticleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(article_id = id, "Article updated");
    Ok(Json(article))
}

/// DELETE /api/v1/articles/{id}
///
/// Ratings and comments on the article are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ArticleRepo::delete(&state.pool, id).await? {
        tracing::info!(article_id = id, "Article deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id).into())
    }
}
