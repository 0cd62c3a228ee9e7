//! Lookups against the seeded `roles` table.

use bely_core::types::DbId;
use sqlx::PgPool;

pub struct RoleRepo;

impl RoleRepo {
    pub async fn find_name(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Role name for token claims. A dangling id yields `"unknown"`, which
    /// passes no role check.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        Ok(Self::find_name(pool, role_id)
            .await?
            .unwrap_or_else(|| "unknown".to_string()))
    }
}
