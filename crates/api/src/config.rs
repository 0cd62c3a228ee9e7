//! Environment-driven server configuration.
//!
//! Everything is read once at startup. A bad value stops the server before
//! it binds, with the offending variable named in the error.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

pub const DEFAULT_GRAPHQL_DEPTH_LIMIT: usize = 8;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Origins allowed by CORS, validated as header values at load time.
    pub cors_origins: Vec<HeaderValue>,
    pub request_timeout_secs: u64,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
    pub graphql_depth_limit: usize,
    pub log_format: LogFormat,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `DATABASE_URL`         | required                |
    /// | `DB_MAX_CONNECTIONS`   | `20`                    |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `MAX_BODY_BYTES`       | `1048576`               |
    /// | `GRAPHQL_DEPTH_LIMIT`  | `8`                     |
    /// | `LOG_FORMAT`           | `pretty` (or `json`)    |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let cors_raw = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        Ok(Self {
            host: env_or("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: env_or("PORT", 3000)?,
            database_url: env_required("DATABASE_URL")?,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 20)?,
            cors_origins: parse_origins(&cors_raw)?,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            max_body_bytes: env_or("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            graphql_depth_limit: env_or("GRAPHQL_DEPTH_LIMIT", DEFAULT_GRAPHQL_DEPTH_LIMIT)?,
            log_format: env_or("LOG_FORMAT", LogFormat::Pretty)?,
            jwt: JwtConfig::from_env()?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Read `key`, falling back to `default` when unset.
pub(crate) fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    parse_value(key, std::env::var(key).ok(), default)
}

/// Read `key`, which must be present and non-blank.
pub(crate) fn env_required(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_value<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// Split a comma-separated origin list, skipping blanks.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                key: "CORS_ORIGINS",
                value: origin.to_string(),
            })
        })
        .collect()
}
