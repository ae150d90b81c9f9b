//! Storage room entity and its occupancy state.

pub mod model;

pub use model::{Room, RoomNumber, RoomState};
