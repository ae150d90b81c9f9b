//! HTTP request handlers grouped by resource.

pub mod auth;
pub mod health;
pub mod rooms;
pub mod users;
