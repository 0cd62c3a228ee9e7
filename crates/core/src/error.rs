//! Domain error shared by the repositories, handlers and GraphQL resolvers.

use crate::types::DbId;

/// A rule violation or missing record, independent of transport.
///
/// The API layer maps each variant to an HTTP status and a stable code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No `entity` row with this id.
    #[error("{entity} #{id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    #[error("invalid input: {0}")]
    Validation(String),

    /// A uniqueness rule would be broken, e.g. a taken slug or username.
    #[error("already exists: {0}")]
    Conflict(String),

    #[error("not authenticated: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role or ownership check failed.
    #[error("not allowed: {0}")]
    Forbidden(String),

    #[error("internal failure: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Product",
            id: 7,
        };
        assert_eq!(err.to_string(), "Product #7 does not exist");
    }
}
