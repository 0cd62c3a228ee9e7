//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod article;
pub mod author;
pub mod cart;
pub mod feedback;
pub mod literary_work;
pub mod place;
pub mod product;
pub mod session;
pub mod user;
