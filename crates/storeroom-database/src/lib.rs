//! # storeroom-database
//!
//! Storage abstraction for Storeroom. The [`RoomStore`] and [`UserStore`]
//! traits are the only way the service layer touches persisted state; the
//! in-memory stores back tests and single-node deployments, the PostgreSQL
//! repositories back durable ones.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryRoomStore, MemoryUserStore};
pub use repositories::{RoomRepository, UserRepository};
pub use store::{RoomStore, UserStore};
