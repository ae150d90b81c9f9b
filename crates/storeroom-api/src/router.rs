//! Route definitions for the Storeroom HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route, without middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(room_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(health_routes())
        .with_state(state)
}

/// Room listing and booking
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(handlers::rooms::list_rooms))
        .route("/rooms/booking/{number}", post(handlers::rooms::book_room))
        .route(
            "/rooms/cancellation/{number}",
            post(handlers::rooms::cancel_booking),
        )
        .route("/rooms/release/{number}", post(handlers::rooms::release_room))
}

/// Registration, login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// User directory
fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(handlers::users::list_users))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
