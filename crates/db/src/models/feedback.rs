//! Rating and comment models.
//!
//! Both tables identify their target by `(target_type, target_id)`; the type
//! tag is a [`bely_core::content::ContentKind`] string.

use bely_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub target_type: String,
    pub target_id: DbId,
    pub value: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A rating joined with its author's username, for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingWithUser {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub value: i16,
    pub created_at: Timestamp,
}

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub target_type: String,
    pub target_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment joined with its author's username, for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithUser {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub avatar_path: Option<String>,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for rating a target.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTarget {
    pub value: i32,
}

/// Request body for creating or editing a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentBody {
    pub text: String,
}
