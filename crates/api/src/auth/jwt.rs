//! JWT access tokens and opaque refresh tokens.
//!
//! Access tokens are HS256-signed and carry [`Claims`]. Refresh tokens are
//! random UUID strings; only their SHA-256 hex digest is persisted in
//! `user_sessions`.

use bely_core::types::{DbId, Timestamp};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{env_or, env_required, ConfigError};

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Payload of every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's internal database id.
    pub sub: DbId,
    /// Role name (`"admin"` or `"user"`).
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique token id.
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT settings from the environment.
    ///
    /// | Env Var                    | Default  |
    /// |----------------------------|----------|
    /// | `JWT_SECRET`               | required |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | `15`     |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | `7`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env_required("JWT_SECRET")?,
            access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS)?,
            refresh_token_expiry_days: env_or(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            )?,
        })
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// Expiry instant for a refresh token issued now.
    pub fn refresh_expires_at(&self) -> Timestamp {
        Utc::now() + Duration::days(self.refresh_token_expiry_days)
    }
}

/// Sign an access token for `user_id` with the given role.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: iat + config.access_ttl_secs(),
        iat,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry, returning the embedded claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// New refresh token as `(plaintext, sha256_hex)`.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_refresh_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn test_token_round_trip_keeps_subject_and_role() {
        let config = config("bely-test-secret");
        let token = generate_access_token(42, "admin", &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = config("bely-test-secret");
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: "user".to_string(),
            // Well past the default 60-second leeway.
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_foreign_secret_fails() {
        let token = generate_access_token(1, "user", &config("alpha")).unwrap();
        assert!(validate_token(&token, &config("bravo")).is_err());
    }

    #[test]
    fn test_refresh_hash_is_stable_hex() {
        let (plaintext, hash) = generate_refresh_token();
        assert_eq!(hash, hash_refresh_token(&plaintext));
        assert_eq!(hash.len(), 64);
    }
}
