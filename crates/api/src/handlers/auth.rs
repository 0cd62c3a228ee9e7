//! Handlers for the `/auth` resource (registration, tokens, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bely_core::error::CoreError;
use bely_core::roles::DEFAULT_ROLE_ID;
use bely_core::types::DbId;
use bely_db::models::session::CreateSession;
use bely_db::models::user::{CreateUser, UpdateProfile, User, UserResponse};
use bely_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, hash_refresh_token, JwtConfig,
};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `PUT /auth/profile`. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(min = 3, max = 150))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_path: Option<String>,
}

impl From<ProfileRequest> for UpdateProfile {
    fn from(req: ProfileRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            avatar_path: req.avatar_path,
        }
    }
}

/// Token bundle returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a `user`-role account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_string(),
            password_hash,
            role_id: DEFAULT_ROLE_ID,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let response = start_session(&state, user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || CoreError::Unauthorized("Invalid username or password".into());

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid().into());
    }

    if !user.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    let purged = SessionRepo::purge_dead_for_user(&state.pool, user.id).await?;
    tracing::debug!(user_id = user.id, purged, "Stale sessions purged");

    let response = start_session(&state, user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a new bundle. The presented token is
/// revoked as part of the exchange, so replaying it fails with 401.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let rejected = || CoreError::Unauthorized("Invalid or expired refresh token".into());
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(rejected)?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("User no longer exists".into()))?;
    if !user.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let tokens = IssuedTokens::sign(&state.config.jwt, &user, &role)?;
    SessionRepo::rotate(&state.pool, session.id, &tokens.session)
        .await?
        .ok_or_else(rejected)?;

    Ok(Json(tokens.into_response(&state.config.jwt, user, role)))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, auth_user.user_id).await?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(UserResponse::from_user(user, role)))
}

/// PUT /api/v1/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;

    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &input.into())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        })?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(UserResponse::from_user(user, role)))
}

/// DELETE /api/v1/auth/profile
///
/// Close the caller's account: further logins get 403 and every refresh
/// session is revoked. Access tokens already issued run until they expire.
pub async fn deactivate_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<StatusCode> {
    if !UserRepo::deactivate(&state.pool, auth_user.user_id).await? {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "Account deactivated");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(user)
}

/// A freshly signed token pair and the session row that backs it.
struct IssuedTokens {
    access_token: String,
    refresh_token: String,
    session: CreateSession,
}

impl IssuedTokens {
    fn sign(jwt: &JwtConfig, user: &User, role: &str) -> AppResult<Self> {
        let access_token = generate_access_token(user.id, role, jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
        let (refresh_token, refresh_hash) = generate_refresh_token();
        Ok(Self {
            access_token,
            refresh_token,
            session: CreateSession {
                user_id: user.id,
                refresh_token_hash: refresh_hash,
                expires_at: jwt.refresh_expires_at(),
            },
        })
    }

    fn into_response(self, jwt: &JwtConfig, user: User, role: String) -> AuthResponse {
        AuthResponse {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: jwt.access_ttl_secs(),
            user: UserResponse::from_user(user, role),
        }
    }
}

/// Sign a token pair for `user` and open a new session for it.
async fn start_session(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let tokens = IssuedTokens::sign(&state.config.jwt, &user, &role)?;
    SessionRepo::create(&state.pool, &tokens.session).await?;
    Ok(tokens.into_response(&state.config.jwt, user, role))
}
