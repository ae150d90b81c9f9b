//! # storeroom-api
//!
//! HTTP API layer for Storeroom built on Axum.
//!
//! Provides the room booking and account endpoints, middleware (request
//! logging, CORS, timeouts), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
