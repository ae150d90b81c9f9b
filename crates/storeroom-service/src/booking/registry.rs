//! Authoritative room occupancy with atomic check-then-write.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use storeroom_database::RoomStore;
use storeroom_entity::room::{Room, RoomNumber, RoomState};

use super::error::BookingError;

/// Maximum number of rooms one user may hold at the same time.
pub const MAX_BOOKINGS_PER_USER: usize = 5;

/// Snapshot of every room with occupancy totals.
///
/// `free + occupied == rooms.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomListing {
    /// Rooms ordered by number.
    pub rooms: Vec<Room>,
    /// Number of rooms without a tenant.
    pub free: usize,
    /// Number of rooms with a tenant.
    pub occupied: usize,
}

impl RoomListing {
    fn from_rooms(rooms: Vec<Room>) -> Self {
        let free = rooms.iter().filter(|r| r.is_free()).count();
        let occupied = rooms.len() - free;
        Self {
            rooms,
            free,
            occupied,
        }
    }
}

/// Single source of truth for room occupancy.
///
/// Every mutation runs under an exclusive gate so the quota count, the room
/// lookup and the write form one indivisible step. Reads share the gate.
/// The gate only covers this process; multiple server instances against one
/// database would need a row lock in the store instead.
pub struct RoomRegistry {
    /// Backing room table.
    store: Arc<dyn RoomStore>,
    /// Serializes mutations against each other and against reads.
    gate: RwLock<()>,
}

impl fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomRegistry").finish_non_exhaustive()
    }
}

impl RoomRegistry {
    /// Creates a registry over the given store.
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self {
            store,
            gate: RwLock::new(()),
        }
    }

    /// All rooms ordered by number, with free and occupied totals.
    pub async fn list_rooms(&self) -> Result<RoomListing, BookingError> {
        let _read = self.gate.read().await;
        let rooms = self.store.list_rooms().await?;
        Ok(RoomListing::from_rooms(rooms))
    }

    /// Makes `user` the tenant of room `number`.
    ///
    /// Checks, in order: the user is under quota, the room exists, the room
    /// is free. A user booking a room they already hold gets `RoomOccupied`.
    pub async fn book_room(&self, user: &str, number: RoomNumber) -> Result<(), BookingError> {
        let _write = self.gate.write().await;

        let held = self.store.count_by_tenant(user).await?;
        if held >= MAX_BOOKINGS_PER_USER {
            warn!(tenant = %user, room = number, held, "Booking rejected: quota reached");
            return Err(BookingError::QuotaExceeded {
                limit: MAX_BOOKINGS_PER_USER,
            });
        }

        let room = self
            .store
            .get_room(number)
            .await?
            .ok_or(BookingError::RoomNotFound(number))?;

        if let RoomState::Occupied(tenant) = room.state() {
            warn!(room = number, tenant = %user, holder = %tenant, "Booking rejected: room occupied");
            return Err(BookingError::RoomOccupied(number));
        }

        if !self.store.set_tenant(number, Some(user)).await? {
            return Err(BookingError::RoomNotFound(number));
        }

        info!(room = number, tenant = %user, booked = held + 1, "Room booked");
        Ok(())
    }

    /// Frees room `number`.
    ///
    /// With `require_ownership`, a room held by anyone other than `user` is
    /// rejected with `NotOwner`. Releasing a room that is already free
    /// succeeds without touching the store.
    pub async fn release_room(
        &self,
        user: &str,
        number: RoomNumber,
        require_ownership: bool,
    ) -> Result<(), BookingError> {
        let _write = self.gate.write().await;

        let room = self
            .store
            .get_room(number)
            .await?
            .ok_or(BookingError::RoomNotFound(number))?;

        match room.state() {
            RoomState::Free => {
                debug!(room = number, tenant = %user, "Release of a free room ignored");
                return Ok(());
            }
            RoomState::Occupied(holder) if require_ownership && !room.is_held_by(user) => {
                warn!(room = number, tenant = %user, holder = %holder, "Release rejected: not owner");
                return Err(BookingError::NotOwner(number));
            }
            RoomState::Occupied(_) => {}
        }

        if !self.store.set_tenant(number, None).await? {
            return Err(BookingError::RoomNotFound(number));
        }

        info!(room = number, tenant = ?room.tenant, released_by = %user, "Room released");
        Ok(())
    }

    /// Number of rooms currently held by `user`.
    pub async fn count_booked_by(&self, user: &str) -> Result<usize, BookingError> {
        let _read = self.gate.read().await;
        Ok(self.store.count_by_tenant(user).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use storeroom_core::error::AppError;
    use storeroom_core::result::AppResult;
    use storeroom_database::MemoryRoomStore;

    fn registry(rooms: u32) -> RoomRegistry {
        RoomRegistry::new(Arc::new(MemoryRoomStore::seeded(rooms)))
    }

    fn tenant_of(listing: &RoomListing, number: RoomNumber) -> Option<&str> {
        listing
            .rooms
            .iter()
            .find(|r| r.number == number)
            .and_then(|r| r.tenant.as_deref())
    }

    #[tokio::test]
    async fn test_listing_counts() {
        let registry = registry(10);
        registry.book_room("bob", 2).await.expect("book");
        registry.book_room("alice", 9).await.expect("book");

        let listing = registry.list_rooms().await.expect("list");
        assert_eq!(listing.rooms.len(), 10);
        assert_eq!(listing.free, 8);
        assert_eq!(listing.occupied, 2);
        assert!(listing.rooms.windows(2).all(|w| w[0].number < w[1].number));
    }

    #[tokio::test]
    async fn test_occupied_room_rejects_everyone() {
        let registry = registry(10);
        registry.book_room("bob", 7).await.expect("book");

        let err = registry.book_room("alice", 7).await.expect_err("occupied");
        assert!(matches!(err, BookingError::RoomOccupied(7)));
        let err = registry.book_room("bob", 7).await.expect_err("rebook own");
        assert!(matches!(err, BookingError::RoomOccupied(7)));
        assert_eq!(registry.count_booked_by("bob").await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_unknown_room() {
        let registry = registry(3);
        let err = registry.book_room("bob", 42).await.expect_err("missing");
        assert!(matches!(err, BookingError::RoomNotFound(42)));
        let err = registry
            .release_room("bob", 42, true)
            .await
            .expect_err("missing");
        assert!(matches!(err, BookingError::RoomNotFound(42)));
    }

    #[tokio::test]
    async fn test_quota_checked_before_room_state() {
        let registry = registry(10);
        for n in 1..=5 {
            registry.book_room("carol", n).await.expect("book");
        }
        // Room 99 does not exist, but the quota is reported first.
        let err = registry.book_room("carol", 99).await.expect_err("quota");
        assert!(matches!(err, BookingError::QuotaExceeded { limit: 5 }));
    }

    #[tokio::test]
    async fn test_quota_caps_holdings() {
        let registry = registry(10);
        let mut granted = 0;
        for n in 1..=8 {
            if registry.book_room("carol", n).await.is_ok() {
                granted += 1;
            }
        }
        assert_eq!(granted, MAX_BOOKINGS_PER_USER);
        assert_eq!(
            registry.count_booked_by("carol").await.expect("count"),
            MAX_BOOKINGS_PER_USER
        );
    }

    #[tokio::test]
    async fn test_release_by_non_owner() {
        let registry = registry(10);
        registry.book_room("bob", 4).await.expect("book");

        let err = registry
            .release_room("mallory", 4, true)
            .await
            .expect_err("not owner");
        assert!(matches!(err, BookingError::NotOwner(4)));
        let listing = registry.list_rooms().await.expect("list");
        assert_eq!(tenant_of(&listing, 4), Some("bob"));

        registry
            .release_room("mallory", 4, false)
            .await
            .expect("ownership not required");
        let listing = registry.list_rooms().await.expect("list");
        assert_eq!(tenant_of(&listing, 4), None);
    }

    #[tokio::test]
    async fn test_release_of_free_room_is_noop() {
        let registry = registry(10);
        let before = registry.list_rooms().await.expect("list");
        registry.release_room("eve", 2, true).await.expect("no-op");
        registry.release_room("eve", 2, true).await.expect("no-op");
        assert_eq!(registry.list_rooms().await.expect("list"), before);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_bookings_of_one_room() {
        let registry = Arc::new(registry(10));
        let mut handles = Vec::new();
        for i in 0..32 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry.book_room(&format!("user{i}"), 1).await
            }));
        }

        let mut granted = 0;
        for handle in handles {
            match handle.await.expect("join") {
                Ok(()) => granted += 1,
                Err(BookingError::RoomOccupied(1)) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(granted, 1);
        assert_eq!(registry.list_rooms().await.expect("list").occupied, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_bookings_respect_quota() {
        let registry = Arc::new(registry(40));
        let mut handles = Vec::new();
        for n in 1..=40 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(
                async move { registry.book_room("carol", n).await },
            ));
        }

        let mut granted = 0;
        for handle in handles {
            match handle.await.expect("join") {
                Ok(()) => granted += 1,
                Err(BookingError::QuotaExceeded { limit: 5 }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(granted, 5);
        assert_eq!(registry.count_booked_by("carol").await.expect("count"), 5);
    }

    /// Room store whose writes can be made to fail.
    struct FlakyStore {
        inner: MemoryRoomStore,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl RoomStore for FlakyStore {
        async fn list_rooms(&self) -> AppResult<Vec<Room>> {
            self.inner.list_rooms().await
        }

        async fn get_room(&self, number: RoomNumber) -> AppResult<Option<Room>> {
            self.inner.get_room(number).await
        }

        async fn set_tenant(&self, number: RoomNumber, tenant: Option<&str>) -> AppResult<bool> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(AppError::database("connection reset"));
            }
            self.inner.set_tenant(number, tenant).await
        }

        async fn count_by_tenant(&self, tenant: &str) -> AppResult<usize> {
            self.inner.count_by_tenant(tenant).await
        }
    }

    #[tokio::test]
    async fn test_storage_failure_leaves_state_untouched() {
        let store = Arc::new(FlakyStore {
            inner: MemoryRoomStore::seeded(5),
            fail_writes: AtomicBool::new(false),
        });
        let registry = RoomRegistry::new(store.clone());
        registry.book_room("bob", 1).await.expect("book");

        store.fail_writes.store(true, Ordering::SeqCst);
        let err = registry.book_room("bob", 2).await.expect_err("store down");
        assert!(matches!(err, BookingError::Storage(_)));
        let err = registry
            .release_room("bob", 1, true)
            .await
            .expect_err("store down");
        assert!(matches!(err, BookingError::Storage(_)));

        let listing = registry.list_rooms().await.expect("list");
        assert_eq!(tenant_of(&listing, 1), Some("bob"));
        assert_eq!(tenant_of(&listing, 2), None);
        assert_eq!(listing.occupied, 1);
    }
}
