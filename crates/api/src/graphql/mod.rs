//! GraphQL read surface over the catalog, plus the `rate` mutation.
//!
//! The schema holds the connection pool as context data. The HTTP handler
//! adds the caller's [`AuthUser`](crate::middleware::auth::AuthUser) to the
//! request data when a bearer token is present.

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, ErrorExtensions, Schema};
use bely_db::DbPool;

use crate::error::AppError;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the pool attached and a maximum query depth.
pub fn build_schema(pool: DbPool, depth_limit: usize) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .limit_depth(depth_limit)
        .finish()
}

/// Convert an application error into a GraphQL error carrying the same
/// `code` extension the REST API returns.
pub(crate) fn gql_error(err: impl Into<AppError>) -> async_graphql::Error {
    let (_, code, message) = err.into().classify();
    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}
