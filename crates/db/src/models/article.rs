//! Article entity model and DTOs.

use bely_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An article row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub image_path: Option<String>,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new article.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticle {
    pub title: String,
    /// Derived from `title` if omitted.
    pub slug: Option<String>,
    pub image_path: Option<String>,
    pub content: String,
}

/// DTO for updating an existing article. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub image_path: Option<String>,
    pub content: Option<String>,
}
