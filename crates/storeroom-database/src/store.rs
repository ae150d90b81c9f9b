//! Storage traits consumed by the service layer.

use async_trait::async_trait;

use storeroom_core::result::AppResult;
use storeroom_entity::room::{Room, RoomNumber};
use storeroom_entity::user::{CreateUser, User};

/// Persistence of room occupancy.
///
/// Implementations only read and write rows. They do not enforce booking
/// rules and do not serialize read-then-write sequences; callers that need
/// atomicity hold their own lock around a sequence of calls.
#[async_trait]
pub trait RoomStore: Send + Sync + 'static {
    /// All rooms ordered by number.
    async fn list_rooms(&self) -> AppResult<Vec<Room>>;

    /// A single room, or `None` if no room has this number.
    async fn get_room(&self, number: RoomNumber) -> AppResult<Option<Room>>;

    /// Overwrite the tenant of a room.
    ///
    /// Returns `false` if no room has this number.
    async fn set_tenant(&self, number: RoomNumber, tenant: Option<&str>) -> AppResult<bool>;

    /// Number of rooms currently held by `tenant`.
    async fn count_by_tenant(&self, tenant: &str) -> AppResult<usize>;
}

/// Persistence of registered users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by exact login.
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with a conflict error if the login is taken.
    async fn create(&self, user: CreateUser) -> AppResult<User>;

    /// Logins of every registered user, in registration order.
    async fn list_logins(&self) -> AppResult<Vec<String>>;
}
