//! JWT token validation and revocation checking.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use storeroom_core::config::AuthConfig;
use storeroom_core::error::AppError;
use storeroom_core::types::TokenId;

use super::claims::Claims;

/// Validates JWT tokens and tracks revoked token IDs.
///
/// Clones share the same revocation list.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Revoked token IDs mapped to their expiry timestamp.
    revoked: Arc<DashMap<TokenId, i64>>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .field("revoked", &self.revoked.len())
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            revoked: Arc::new(DashMap::new()),
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks signature, expiration, and that the token was not revoked.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })?
            .claims;

        if self.is_revoked(&claims.jti) {
            return Err(AppError::authentication("Token has been revoked"));
        }

        Ok(claims)
    }

    /// Revokes the token described by `claims` until it expires.
    pub fn revoke(&self, claims: &Claims) {
        self.prune_expired();
        self.revoked.insert(claims.jti, claims.exp);
        debug!(jti = %claims.jti, "Token revoked");
    }

    /// Whether the given token ID has been revoked.
    pub fn is_revoked(&self, jti: &TokenId) -> bool {
        self.revoked.contains_key(jti)
    }

    /// Drops revocation entries whose tokens can no longer validate anyway.
    fn prune_expired(&self) {
        let cutoff = Utc::now().timestamp() - self.validation.leeway as i64;
        self.revoked.retain(|_, exp| *exp >= cutoff);
    }
}
