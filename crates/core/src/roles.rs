//! Role names and the checks built on them.
//!
//! Names and ids must match the seed rows in `20250101000001_create_users.sql`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Role id assigned to self-registered accounts.
pub const DEFAULT_ROLE_ID: i64 = 2;

/// Catalog writes (articles, products, places, literary works, authors)
/// are reserved for admins.
pub fn ensure_admin(role: &str) -> Result<(), CoreError> {
    if role == ROLE_ADMIN {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Admin role required".into()))
    }
}
