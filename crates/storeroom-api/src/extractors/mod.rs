//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;

pub use auth::{AuthUser, Viewer};
pub use json::ValidatedJson;
pub use path::RoomNumberPath;
