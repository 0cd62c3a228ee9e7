//! Literary work entity model and DTOs.

use bely_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `literary_works` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LiteraryWork {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new literary work.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLiteraryWork {
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
}

/// DTO for updating an existing literary work. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLiteraryWork {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_path: Option<String>,
}
