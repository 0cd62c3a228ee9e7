//! Repository for the `ratings` table and the product rating cache.

use std::collections::HashMap;

use bely_core::content::{ContentKind, ContentTarget};
use bely_core::feedback::RatingSummary;
use bely_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::feedback::{Rating, RatingWithUser};
use crate::repositories::ContentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, target_type, target_id, value, created_at, updated_at";

/// Provides upsert, aggregation and listing for ratings.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert or replace `user_id`'s rating on `target` and refresh aggregates.
    ///
    /// Returns `None` if the target does not exist. The target row is locked
    /// for the duration of the transaction so a concurrent delete cannot leave
    /// the new rating orphaned.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        target: ContentTarget,
        value: i16,
    ) -> Result<Option<(Rating, RatingSummary)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !ContentRepo::lock_target(&mut *tx, target).await? {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO ratings (user_id, target_type, target_id, value) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_ratings_user_target \
             DO UPDATE SET value = EXCLUDED.value \
             RETURNING {COLUMNS}"
        );
        let rating = sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(target.kind.as_str())
            .bind(target.id)
            .bind(value)
            .fetch_one(&mut *tx)
            .await?;

        let summary = Self::refresh_aggregate(&mut *tx, target).await?;
        tx.commit().await?;

        Ok(Some((rating, summary)))
    }

    /// Remove `user_id`'s rating on `target`.
    ///
    /// Returns the refreshed summary, or `None` if there was nothing to remove.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        target: ContentTarget,
    ) -> Result<Option<RatingSummary>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !ContentRepo::lock_target(&mut *tx, target).await? {
            return Ok(None);
        }

        let removed = sqlx::query(
            "DELETE FROM ratings WHERE user_id = $1 AND target_type = $2 AND target_id = $3",
        )
        .bind(user_id)
        .bind(target.kind.as_str())
        .bind(target.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if removed == 0 {
            return Ok(None);
        }

        let summary = Self::refresh_aggregate(&mut *tx, target).await?;
        tx.commit().await?;
        Ok(Some(summary))
    }

    /// Average and count of all ratings on `target`.
    pub async fn summary<'e>(
        executor: impl PgExecutor<'e>,
        target: ContentTarget,
    ) -> Result<RatingSummary, sqlx::Error> {
        let (average, count): (Option<f64>, i64) = sqlx::query_as(
            "SELECT AVG(value)::float8, COUNT(*) \
             FROM ratings WHERE target_type = $1 AND target_id = $2",
        )
        .bind(target.kind.as_str())
        .bind(target.id)
        .fetch_one(executor)
        .await?;
        Ok(RatingSummary { average, count })
    }

    /// Summaries for many targets of one kind in a single query.
    ///
    /// Targets without ratings are absent from the map; callers should fall
    /// back to [`RatingSummary::empty`].
    pub async fn summaries(
        pool: &PgPool,
        kind: ContentKind,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, RatingSummary>, sqlx::Error> {
        let rows: Vec<(DbId, Option<f64>, i64)> = sqlx::query_as(
            "SELECT target_id, AVG(value)::float8, COUNT(*) \
             FROM ratings WHERE target_type = $1 AND target_id = ANY($2) \
             GROUP BY target_id",
        )
        .bind(kind.as_str())
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, average, count)| (id, RatingSummary { average, count }))
            .collect())
    }

    /// List ratings on `target` with usernames, newest first.
    pub async fn list_for_target(
        pool: &PgPool,
        target: ContentTarget,
    ) -> Result<Vec<RatingWithUser>, sqlx::Error> {
        sqlx::query_as::<_, RatingWithUser>(
            "SELECT r.id, r.user_id, u.username, r.value, r.created_at \
             FROM ratings r JOIN users u ON u.id = r.user_id \
             WHERE r.target_type = $1 AND r.target_id = $2 \
             ORDER BY r.updated_at DESC, r.id DESC",
        )
        .bind(target.kind.as_str())
        .bind(target.id)
        .fetch_all(pool)
        .await
    }

    /// Find the rating `user_id` gave `target`, if any.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        target: ContentTarget,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings \
             WHERE user_id = $1 AND target_type = $2 AND target_id = $3"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(target.kind.as_str())
            .bind(target.id)
            .fetch_optional(pool)
            .await
    }

    /// Recompute the summary and, for kinds that cache it, rewrite the
    /// denormalized `average_rating` column from scratch.
    async fn refresh_aggregate(
        conn: &mut PgConnection,
        target: ContentTarget,
    ) -> Result<RatingSummary, sqlx::Error> {
        let summary = Self::summary(&mut *conn, target).await?;

        if target.kind.caches_average() {
            let query = format!(
                "UPDATE {} SET average_rating = $2 WHERE id = $1",
                target.kind.table()
            );
            sqlx::query(&query)
                .bind(target.id)
                .bind(summary.average)
                .execute(&mut *conn)
                .await?;
        }

        Ok(summary)
    }
}
