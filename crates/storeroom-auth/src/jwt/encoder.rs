//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use storeroom_core::config::AuthConfig;
use storeroom_core::error::AppError;
use storeroom_core::types::{TokenId, UserId};

use super::claims::Claims;

/// Creates signed JWT access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish_non_exhaustive()
    }
}

/// A freshly signed access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub access_token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
    /// Token ID, usable for revocation.
    pub token_id: TokenId,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: i64::try_from(config.jwt_access_ttl_minutes).unwrap_or(i64::MAX),
        }
    }

    /// Signs a new access token for the given user.
    pub fn issue(&self, user_id: UserId, login: &str) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(self.access_ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::configuration("auth.jwt_access_ttl_minutes is out of range"))?;
        let token_id = TokenId::new();

        let claims = Claims {
            sub: user_id,
            login: login.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: token_id,
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
            token_id,
        })
    }
}
