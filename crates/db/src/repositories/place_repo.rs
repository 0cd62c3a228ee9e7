//! Repository for the `places` table.

use bely_core::content::{ContentKind, ContentTarget};
use bely_core::types::DbId;
use sqlx::PgPool;

use crate::models::place::{CreatePlace, Place, UpdatePlace};
use crate::repositories::ContentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, address, description, created_at, updated_at";

/// Provides CRUD operations for places.
pub struct PlaceRepo;

impl PlaceRepo {
    /// Insert a new place, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePlace) -> Result<Place, sqlx::Error> {
        let query = format!(
            "INSERT INTO places (title, address, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(&input.title)
            .bind(&input.address)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a place by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places WHERE id = $1");
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List places alphabetically.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Place>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM places ORDER BY title, id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Place>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a place. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, sqlx::Error> {
        let query = format!(
            "UPDATE places SET
                title = COALESCE($2, title),
                address = COALESCE($3, address),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.address)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a place with its ratings and comments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        ContentRepo::delete(pool, ContentTarget::new(ContentKind::Place, id)).await
    }
}
