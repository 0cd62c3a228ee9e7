//! Repository for refresh-token sessions (`user_sessions`).
//!
//! A session row exists per issued refresh token. Rows are never updated
//! except to flip `is_revoked`; a refresh swaps one row for a new one.

use bely_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str =
    "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// The session owning `hash`, if it is neither revoked nor expired.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1 AND NOT is_revoked AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke session `old_id` and store its replacement in one transaction.
    ///
    /// Returns `None` (and stores nothing) when `old_id` is no longer live,
    /// which is how a replayed or concurrently used refresh token shows up.
    pub async fn rotate(
        pool: &PgPool,
        old_id: DbId,
        replacement: &CreateSession,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let revoked = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE id = $1 AND NOT is_revoked AND expires_at > NOW()",
        )
        .bind(old_id)
        .execute(&mut *tx)
        .await?;
        if revoked.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, UserSession>(&query)
            .bind(replacement.user_id)
            .bind(&replacement.refresh_token_hash)
            .bind(replacement.expires_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(session))
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND NOT is_revoked",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a user's revoked and expired sessions.
    pub async fn purge_dead_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_sessions
             WHERE user_id = $1 AND (is_revoked OR expires_at <= NOW())",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
