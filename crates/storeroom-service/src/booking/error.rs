//! Booking rejections.

use thiserror::Error;

use storeroom_core::error::AppError;
use storeroom_entity::room::RoomNumber;

/// Why a booking operation did not happen.
///
/// Every variant except `Storage` is caller-correctable and leaves state
/// untouched. `Storage` wraps an unexpected failure of the backing store.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The caller is anonymous.
    #[error("Authentication required")]
    Unauthenticated,
    /// No room has this number.
    #[error("Room {0} does not exist")]
    RoomNotFound(RoomNumber),
    /// The room is held by someone, possibly the caller.
    #[error("Room {0} is already occupied")]
    RoomOccupied(RoomNumber),
    /// The caller already holds the maximum number of rooms.
    #[error("Booking limit reached: at most {limit} rooms per user")]
    QuotaExceeded {
        /// Maximum rooms a user may hold.
        limit: usize,
    },
    /// The room is held by another user.
    #[error("Room {0} is booked by another user")]
    NotOwner(RoomNumber),
    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] AppError),
}

impl BookingError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::RoomNotFound(_) => "ROOM_NOT_FOUND",
            Self::RoomOccupied(_) => "ROOM_OCCUPIED",
            Self::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            Self::NotOwner(_) => "NOT_OWNER",
            Self::Storage(_) => "INTERNAL",
        }
    }
}
