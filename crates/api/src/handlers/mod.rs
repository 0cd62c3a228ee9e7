pub mod article;
pub mod auth;
pub mod author;
pub mod cart;
pub mod feedback;
pub mod graphql;
pub mod literary_work;
pub mod place;
pub mod product;
