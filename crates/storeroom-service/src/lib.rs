//! # storeroom-service
//!
//! Business logic for Storeroom. The booking side owns every occupancy rule
//! (exclusivity, per-user quota, ownership); the account side wraps the
//! identity collaborator (registration, login, token revocation).
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod booking;
pub mod context;

pub use account::{AccountService, LoginSession};
pub use booking::{
    BookingError, BookingService, MAX_BOOKINGS_PER_USER, RoomListing, RoomRegistry,
};
pub use context::AuthContext;
