//! Auth handlers: register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CredentialsRequest;
use crate::dto::response::{LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.accounts.register(&req.login, &req.password).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = state.accounts.login(&req.login, &req.password).await?;
    Ok(Json(LoginResponse {
        access_token: session.token.access_token,
        expires_at: session.token.expires_at,
        login: session.user.login,
    }))
}

/// POST /auth/logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Json<MessageResponse> {
    state.accounts.logout(&auth.claims);
    Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.accounts.me(&auth.context).await?;
    Ok(Json(UserResponse::from(user)))
}
