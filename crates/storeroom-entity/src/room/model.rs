//! Room entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Caller-facing room identifier. Rooms are numbered from 1.
pub type RoomNumber = i32;

/// A numbered storage room and its current tenant.
///
/// Rooms are provisioned once as seed data; only `tenant` ever changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique, immutable room number.
    pub number: RoomNumber,
    /// Login of the user holding the room, `None` when free.
    pub tenant: Option<String>,
}

/// Occupancy of a single room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState<'a> {
    /// Nobody holds the room.
    Free,
    /// The room is held by the given tenant.
    Occupied(&'a str),
}

impl Room {
    /// Current occupancy of the room.
    pub fn state(&self) -> RoomState<'_> {
        match self.tenant.as_deref() {
            Some(tenant) => RoomState::Occupied(tenant),
            None => RoomState::Free,
        }
    }

    /// Whether nobody holds the room.
    pub fn is_free(&self) -> bool {
        self.tenant.is_none()
    }

    /// Whether `login` is the current tenant.
    pub fn is_held_by(&self, login: &str) -> bool {
        self.tenant.as_deref() == Some(login)
    }
}
