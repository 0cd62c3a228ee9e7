//! Place entity model and DTOs.

use bely_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A place row from the `places` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Place {
    pub id: DbId,
    pub title: String,
    pub address: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new place.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlace {
    pub title: String,
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for updating an existing place. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlace {
    pub title: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}
