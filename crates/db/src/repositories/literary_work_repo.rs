//! Repository for the `literary_works` table.

use bely_core::content::{ContentKind, ContentTarget};
use bely_core::types::DbId;
use sqlx::PgPool;

use crate::models::literary_work::{CreateLiteraryWork, LiteraryWork, UpdateLiteraryWork};
use crate::repositories::ContentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, image_path, created_at, updated_at";

/// Provides CRUD operations for literary works.
pub struct LiteraryWorkRepo;

impl LiteraryWorkRepo {
    /// Insert a new literary work, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLiteraryWork,
    ) -> Result<LiteraryWork, sqlx::Error> {
        let query = format!(
            "INSERT INTO literary_works (title, content, image_path)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LiteraryWork>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    /// Find a literary work by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LiteraryWork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM literary_works WHERE id = $1");
        sqlx::query_as::<_, LiteraryWork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List literary works, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LiteraryWork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM literary_works \
             ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, LiteraryWork>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a literary work. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLiteraryWork,
    ) -> Result<Option<LiteraryWork>, sqlx::Error> {
        let query = format!(
            "UPDATE literary_works SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                image_path = COALESCE($4, image_path)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LiteraryWork>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_path)
            .fetch_optional(pool)
            .await
    }

    /// Delete a literary work with its ratings and comments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        ContentRepo::delete(pool, ContentTarget::new(ContentKind::LiteraryWork, id)).await
    }
}
