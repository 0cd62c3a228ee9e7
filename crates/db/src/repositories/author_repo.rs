//! Repository for the `authors` table and product credits.

use bely_core::types::DbId;
use sqlx::PgPool;

use crate::models::author::{Author, CreateAuthor, ProductAuthorCredit, UpdateAuthor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, bio, photo_path, created_at, updated_at";

/// Provides CRUD operations for authors and their product credits.
pub struct AuthorRepo;

impl AuthorRepo {
    /// Insert a new author, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAuthor) -> Result<Author, sqlx::Error> {
        let query = format!(
            "INSERT INTO authors (name, bio, photo_path)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(&input.name)
            .bind(&input.bio)
            .bind(&input.photo_path)
            .fetch_one(pool)
            .await
    }

    /// Find an author by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE id = $1");
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List authors alphabetically.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors ORDER BY name, id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Author>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an author. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAuthor,
    ) -> Result<Option<Author>, sqlx::Error> {
        let query = format!(
            "UPDATE authors SET
                name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                photo_path = COALESCE($4, photo_path)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.bio)
            .bind(&input.photo_path)
            .fetch_optional(pool)
            .await
    }

    /// Delete an author. Their product credits cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Credit an author on a product. Re-crediting replaces the role.
    pub async fn attach(
        pool: &PgPool,
        product_id: DbId,
        author_id: DbId,
        role: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO product_authors (product_id, author_id, role)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_product_authors_product_author
             DO UPDATE SET role = EXCLUDED.role",
        )
        .bind(product_id)
        .bind(author_id)
        .bind(role)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove an author credit. Returns `true` if a credit was removed.
    pub async fn detach(
        pool: &PgPool,
        product_id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM product_authors WHERE product_id = $1 AND author_id = $2")
                .bind(product_id)
                .bind(author_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Authors credited on a product, in the order they were credited.
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductAuthorCredit>, sqlx::Error> {
        sqlx::query_as::<_, ProductAuthorCredit>(
            "SELECT a.id AS author_id, a.name, a.photo_path, pa.role
             FROM product_authors pa
             JOIN authors a ON a.id = pa.author_id
             WHERE pa.product_id = $1
             ORDER BY pa.id",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }
}
