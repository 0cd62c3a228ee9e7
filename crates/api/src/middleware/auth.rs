//! Bearer-token extractors.
//!
//! Tokens are validated statelessly against the configured secret; the
//! role travels in the claims, so no database lookup happens per request.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use bely_core::error::CoreError;
use bely_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// The caller behind a valid access token. Missing or bad tokens give 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: String,
}

impl AuthUser {
    /// Resolve the caller from a raw `Authorization` header value.
    pub fn from_header(header: &str, config: &JwtConfig) -> Result<Self, CoreError> {
        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            )
        })?;

        let claims = validate_token(token, config)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;

        Ok(AuthUser::from_header(header, &state.config.jwt)?)
    }
}

/// The caller if an `Authorization` header is present, otherwise `None`.
///
/// A header that is present but invalid is still rejected with 401 so
/// clients notice expired tokens.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(MaybeAuthUser(Some(user)))
    }
}
