//! Role gate for catalog management routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bely_core::roles::ensure_admin;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated admin. No token gives 401; a non-admin token gives 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_admin(&user.role)?;
        Ok(RequireAdmin(user))
    }
}
