//! User directory handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::UserListResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, ApiError> {
    let users = state.accounts.list_logins().await?;
    Ok(Json(UserListResponse { users }))
}
