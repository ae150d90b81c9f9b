//! # storeroom-entity
//!
//! Domain entity models for Storeroom. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod room;
pub mod user;

pub use room::{Room, RoomNumber, RoomState};
pub use user::{CreateUser, User};
