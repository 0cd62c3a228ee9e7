//! Handlers for ratings and comments on any content entity.
//!
//! Targets are addressed as `/feedback/{target_type}/{target_id}/...` where
//! `target_type` is one of `article`, `product`, `place`, `literary_work`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bely_core::content::ContentTarget;
use bely_core::error::CoreError;
use bely_core::feedback::{
    authorize_comment, validate_comment_text, validate_rating, CommentAction, RatingSummary,
};
use bely_core::types::DbId;
use bely_db::models::feedback::{
    CommentBody, CommentWithUser, RateTarget, Rating, RatingWithUser,
};
use bely_db::repositories::{CommentRepo, ContentRepo, RatingRepo};
use bely_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Ratings and comments of one target, embedded in entity detail responses.
#[derive(Debug, Serialize)]
pub struct FeedbackBundle {
    pub average_rating: Option<f64>,
    pub rating_count: i64,
    pub ratings: Vec<RatingWithUser>,
    pub comments: Vec<CommentWithUser>,
}

/// An entity with its feedback flattened alongside its own fields.
#[derive(Debug, Serialize)]
pub struct WithFeedback<T: Serialize> {
    #[serde(flatten)]
    pub item: T,
    #[serde(flatten)]
    pub feedback: FeedbackBundle,
}

/// Response for `GET .../ratings`.
#[derive(Debug, Serialize)]
pub struct RatingsResponse {
    pub summary: RatingSummary,
    /// The caller's own rating, when authenticated and rated.
    pub own_rating: Option<i16>,
    pub data: Vec<RatingWithUser>,
}

/// Response for `PUT .../ratings`.
#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub rating: Rating,
    pub summary: RatingSummary,
}

// ---------------------------------------------------------------------------
// Shared loaders
// ---------------------------------------------------------------------------

/// Load the summary, ratings and comments of `target`.
pub async fn load_feedback(pool: &DbPool, target: ContentTarget) -> AppResult<FeedbackBundle> {
    let summary = RatingRepo::summary(pool, target).await?;
    let ratings = RatingRepo::list_for_target(pool, target).await?;
    let comments = CommentRepo::list_for_target(pool, target).await?;
    Ok(FeedbackBundle {
        average_rating: summary.average,
        rating_count: summary.count,
        ratings,
        comments,
    })
}

async fn existing_target(
    pool: &DbPool,
    target_type: &str,
    target_id: DbId,
) -> AppResult<ContentTarget> {
    let target = ContentTarget::parse(target_type, target_id)?;
    if !ContentRepo::exists(pool, target).await? {
        return Err(target.not_found().into());
    }
    Ok(target)
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

/// GET /api/v1/feedback/{target_type}/{target_id}/ratings
pub async fn list_ratings(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path((target_type, target_id)): Path<(String, DbId)>,
) -> AppResult<Json<RatingsResponse>> {
    let target = existing_target(&state.pool, &target_type, target_id).await?;

    let summary = RatingRepo::summary(&state.pool, target).await?;
    let data = RatingRepo::list_for_target(&state.pool, target).await?;
    let own_rating = match user {
        Some(user) => RatingRepo::find_for_user(&state.pool, user.user_id, target)
            .await?
            .map(|r| r.value),
        None => None,
    };

    Ok(Json(RatingsResponse {
        summary,
        own_rating,
        data,
    }))
}

/// PUT /api/v1/feedback/{target_type}/{target_id}/ratings
///
/// Create or replace the caller's rating and return the new summary.
pub async fn rate(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((target_type, target_id)): Path<(String, DbId)>,
    Json(input): Json<RateTarget>,
) -> AppResult<Json<RateResponse>> {
    let target = ContentTarget::parse(&target_type, target_id)?;
    let value = validate_rating(input.value)?;

    let (rating, summary) = RatingRepo::upsert(&state.pool, auth_user.user_id, target, value)
        .await?
        .ok_or_else(|| target.not_found())?;

    tracing::info!(
        user_id = auth_user.user_id,
        target_type = %target.kind,
        target_id,
        value,
        "Rating saved"
    );
    Ok(Json(RateResponse { rating, summary }))
}

/// DELETE /api/v1/feedback/{target_type}/{target_id}/ratings
///
/// Remove the caller's rating. 404 if they had not rated the target.
pub async fn remove_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((target_type, target_id)): Path<(String, DbId)>,
) -> AppResult<Json<RatingSummary>> {
    let target = ContentTarget::parse(&target_type, target_id)?;

    let summary = RatingRepo::remove(&state.pool, auth_user.user_id, target)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Rating",
            id: target_id,
        })?;

    tracing::info!(user_id = auth_user.user_id, target_type = %target.kind, target_id, "Rating removed");
    Ok(Json(summary))
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/feedback/{target_type}/{target_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path((target_type, target_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<Vec<CommentWithUser>>>> {
    let target = existing_target(&state.pool, &target_type, target_id).await?;
    let comments = CommentRepo::list_for_target(&state.pool, target).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/feedback/{target_type}/{target_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((target_type, target_id)): Path<(String, DbId)>,
    Json(input): Json<CommentBody>,
) -> AppResult<(StatusCode, Json<CommentWithUser>)> {
    let target = ContentTarget::parse(&target_type, target_id)?;
    let text = validate_comment_text(&input.text)?;

    let comment = CommentRepo::create(&state.pool, auth_user.user_id, target, &text)
        .await?
        .ok_or_else(|| target.not_found())?;
    tracing::info!(
        comment_id = comment.id,
        user_id = auth_user.user_id,
        target_type = %target.kind,
        target_id,
        "Comment created"
    );

    let view = CommentRepo::find_with_user(&state.pool, comment.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Comment",
            id: comment.id,
        })?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /api/v1/comments/{id}
///
/// Only the author may edit a comment.
pub async fn update_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CommentBody>,
) -> AppResult<Json<CommentWithUser>> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Comment",
            id,
        })?;
    authorize_comment(
        CommentAction::Edit,
        comment.user_id,
        auth_user.user_id,
        &auth_user.role,
    )?;
    let text = validate_comment_text(&input.text)?;

    CommentRepo::update_text(&state.pool, id, &text)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Comment",
            id,
        })?;
    let view = CommentRepo::find_with_user(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Comment",
            id,
        })?;
    Ok(Json(view))
}

/// DELETE /api/v1/comments/{id}
///
/// The author or an admin may delete a comment.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Comment",
            id,
        })?;
    authorize_comment(
        CommentAction::Delete,
        comment.user_id,
        auth_user.user_id,
        &auth_user.role,
    )?;

    if !CommentRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Comment",
            id,
        }
        .into());
    }
    tracing::info!(comment_id = id, user_id = auth_user.user_id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
