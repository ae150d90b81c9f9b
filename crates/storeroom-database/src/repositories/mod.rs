//! PostgreSQL implementations of the storage traits.
//!
//! The `rooms` and `users` tables are provisioned outside this crate:
//!
//! ```sql
//! CREATE TABLE rooms (number INTEGER PRIMARY KEY, tenant TEXT);
//! CREATE TABLE users (
//!     id UUID PRIMARY KEY,
//!     login TEXT NOT NULL UNIQUE,
//!     password_hash TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL
//! );
//! ```

pub mod room;
pub mod user;

pub use room::RoomRepository;
pub use user::UserRepository;
