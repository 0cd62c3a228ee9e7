//! Domain logic for the Bely Works backend.
//!
//! Everything in this crate is free of I/O: validation rules, the content
//! kind registry, rating aggregation and cart pricing. The `bely-db` and
//! `bely-api` crates call into these functions before touching the database.

pub mod cart;
pub mod catalog;
pub mod content;
pub mod error;
pub mod feedback;
pub mod roles;
pub mod slug;
pub mod types;
