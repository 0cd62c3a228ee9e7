//! Operations shared by every feedback target, keyed by [`ContentTarget`].
//!
//! Table names come from [`ContentKind::table`], never from request input, so
//! interpolating them into SQL is safe.

use bely_core::content::ContentTarget;
use sqlx::{PgConnection, PgPool};

/// Existence checks and cascading deletes for content entities.
pub struct ContentRepo;

impl ContentRepo {
    /// Whether the target row exists.
    pub async fn exists(pool: &PgPool, target: ContentTarget) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            target.kind.table()
        );
        let (exists,): (bool,) = sqlx::query_as(&query)
            .bind(target.id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// Lock the target row against deletion for the rest of the transaction.
    ///
    /// Kinds with a cached average take a row lock strong enough to serialize
    /// concurrent raters, so each recomputation sees every committed rating.
    /// Returns `false` if the row does not exist (or was deleted by a
    /// transaction that committed while we waited for the lock).
    pub(crate) async fn lock_target(
        conn: &mut PgConnection,
        target: ContentTarget,
    ) -> Result<bool, sqlx::Error> {
        let mode = if target.kind.caches_average() {
            "FOR NO KEY UPDATE"
        } else {
            "FOR KEY SHARE"
        };
        let query = format!(
            "SELECT id FROM {} WHERE id = $1 {mode}",
            target.kind.table()
        );
        let row: Option<(i64,)> = sqlx::query_as(&query)
            .bind(target.id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.is_some())
    }

    /// Delete the target row together with its ratings and comments.
    ///
    /// Returns `true` if the row existed. Runs in one transaction so no
    /// feedback is left pointing at a missing target.
    pub async fn delete(pool: &PgPool, target: ContentTarget) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("DELETE FROM {} WHERE id = $1", target.kind.table());
        let deleted = sqlx::query(&query)
            .bind(target.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Ok(false);
        }

        let ratings = sqlx::query("DELETE FROM ratings WHERE target_type = $1 AND target_id = $2")
            .bind(target.kind.as_str())
            .bind(target.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let comments =
            sqlx::query("DELETE FROM comments WHERE target_type = $1 AND target_id = $2")
                .bind(target.kind.as_str())
                .bind(target.id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        tx.commit().await?;

        tracing::debug!(
            target_type = %target.kind,
            target_id = target.id,
            ratings,
            comments,
            "Deleted content entity and its feedback"
        );
        Ok(true)
    }
}
