//! Repository for the `articles` table.

use bely_core::content::{ContentKind, ContentTarget};
use bely_core::types::DbId;
use sqlx::PgPool;

use crate::models::article::{Article, UpdateArticle};
use crate::repositories::ContentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, image_path, content, created_at, updated_at";

/// Provides CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article with an already-resolved slug.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        slug: &str,
        image_path: Option<&str>,
        content: &str,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (title, slug, image_path, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(title)
            .bind(slug)
            .bind(image_path)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Find an article by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an article by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE slug = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List articles, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an article. Only non-`None` fields in `input` are applied; the
    /// slug is kept when the title changes so existing links keep working.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                image_path = COALESCE($4, image_path),
                content = COALESCE($5, content)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.image_path)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article with its ratings and comments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        ContentRepo::delete(pool, ContentTarget::new(ContentKind::Article, id)).await
    }
}
