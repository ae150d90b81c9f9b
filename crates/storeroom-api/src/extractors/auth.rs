//! Identity extractors. Pull the JWT from the Authorization header and validate it.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use storeroom_auth::Claims;
use storeroom_core::error::AppError;
use storeroom_service::AuthContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Caller identity for routes open to anonymous viewers.
///
/// No header yields `Anonymous`; a header carrying a bad token is rejected.
#[derive(Debug, Clone)]
pub struct Viewer(pub AuthContext);

impl FromRequestParts<AppState> for Viewer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = match bearer_token(parts)? {
            None => AuthContext::Anonymous,
            Some(token) => AuthContext::from(&state.accounts.authenticate(token)?),
        };
        Ok(Self(ctx))
    }
}

/// Authenticated user; the request is rejected without a valid token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Identity passed to services.
    pub context: AuthContext,
    /// Decoded token, kept for revocation on logout.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;
        let claims = state.accounts.authenticate(token)?;
        Ok(Self {
            context: AuthContext::from(&claims),
            claims,
        })
    }
}

/// The bearer token, if an Authorization header is present.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| AppError::authentication("Invalid Authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))
}
