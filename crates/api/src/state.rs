use std::sync::Arc;

use crate::config::ServerConfig;
use crate::graphql::{build_schema, AppSchema};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bely_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// GraphQL schema, built once at startup.
    pub schema: AppSchema,
}

impl AppState {
    /// Assemble the state, building the GraphQL schema over the same pool.
    pub fn new(pool: bely_db::DbPool, config: ServerConfig) -> Self {
        let schema = build_schema(pool.clone(), config.graphql_depth_limit);
        Self {
            pool,
            config: Arc::new(config),
            schema,
        }
    }
}
