//! Author entity model and product-author link DTOs.

use bely_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An author row from the `authors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub name: String,
    pub bio: String,
    pub photo_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new author.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    pub photo_path: Option<String>,
}

/// DTO for updating an existing author. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAuthor {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub photo_path: Option<String>,
}

/// An author credited on a product, with their role on it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductAuthorCredit {
    pub author_id: DbId,
    pub name: String,
    pub photo_path: Option<String>,
    pub role: String,
}

/// Request body for crediting an author on a product.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachAuthor {
    pub author_id: DbId,
    #[serde(default)]
    pub role: String,
}
