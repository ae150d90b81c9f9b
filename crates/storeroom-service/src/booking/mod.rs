//! Room booking: the occupancy registry and the request-facing service.

pub mod error;
pub mod registry;
pub mod service;

pub use error::BookingError;
pub use registry::{MAX_BOOKINGS_PER_USER, RoomListing, RoomRegistry};
pub use service::BookingService;
