//! Repository for the `comments` table.

use bely_core::content::ContentTarget;
use bely_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::{Comment, CommentWithUser};
use crate::repositories::ContentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, target_type, target_id, text, created_at, updated_at";

/// Column list for comments joined with `users u`.
const WITH_USER_COLUMNS: &str = "c.id, c.user_id, u.username, u.avatar_path, c.text, \
                                 c.created_at, c.updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment on `target`. Comments are never upserted.
    ///
    /// Returns `None` if the target does not exist.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        target: ContentTarget,
        text: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !ContentRepo::lock_target(&mut *tx, target).await? {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO comments (user_id, target_type, target_id, text) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(user_id)
            .bind(target.kind.as_str())
            .bind(target.id)
            .bind(text)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(comment))
    }

    /// Find a comment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a comment by ID, joined with its author.
    pub async fn find_with_user(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommentWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_USER_COLUMNS} FROM comments c JOIN users u ON u.id = c.user_id \
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, CommentWithUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List comments on `target`, newest first.
    pub async fn list_for_target(
        pool: &PgPool,
        target: ContentTarget,
    ) -> Result<Vec<CommentWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_USER_COLUMNS} FROM comments c JOIN users u ON u.id = c.user_id \
             WHERE c.target_type = $1 AND c.target_id = $2 \
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, CommentWithUser>(&query)
            .bind(target.kind.as_str())
            .bind(target.id)
            .fetch_all(pool)
            .await
    }

    /// Replace a comment's text. Returns `None` if no such comment exists.
    pub async fn update_text(
        pool: &PgPool,
        id: DbId,
        text: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("UPDATE comments SET text = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(text)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
