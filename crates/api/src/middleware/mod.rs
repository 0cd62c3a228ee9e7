//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller behind a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- the caller if a token was sent, else anonymous.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.

pub mod auth;
pub mod rbac;
