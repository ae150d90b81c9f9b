//! Request-facing booking operations.

use std::sync::Arc;

use storeroom_entity::room::RoomNumber;

use crate::context::AuthContext;

use super::error::BookingError;
use super::registry::{RoomListing, RoomRegistry};

/// Applies caller identity to registry operations.
///
/// Anonymous callers may list rooms but see the redaction marker in place of
/// every tenant; they may not mutate anything.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Shared occupancy registry.
    registry: Arc<RoomRegistry>,
    /// Replaces tenant logins for anonymous viewers.
    redaction_marker: String,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(registry: Arc<RoomRegistry>, redaction_marker: impl Into<String>) -> Self {
        Self {
            registry,
            redaction_marker: redaction_marker.into(),
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// All rooms as the given viewer may see them.
    ///
    /// Counts are never redacted.
    pub async fn list_for_viewer(&self, ctx: &AuthContext) -> Result<RoomListing, BookingError> {
        let mut listing = self.registry.list_rooms().await?;
        if ctx.is_anonymous() {
            for room in listing.rooms.iter_mut().filter(|r| !r.is_free()) {
                room.tenant = Some(self.redaction_marker.clone());
            }
        }
        Ok(listing)
    }

    /// Books room `number` for the caller.
    pub async fn book(&self, ctx: &AuthContext, number: RoomNumber) -> Result<(), BookingError> {
        let login = require_login(ctx)?;
        self.registry.book_room(login, number).await
    }

    /// Cancels the caller's booking of room `number`.
    ///
    /// Identical to [`release`](Self::release); both are exposed so each
    /// route can phrase its own result.
    pub async fn cancel(&self, ctx: &AuthContext, number: RoomNumber) -> Result<(), BookingError> {
        self.release(ctx, number).await
    }

    /// Frees room `number` if the caller holds it.
    pub async fn release(&self, ctx: &AuthContext, number: RoomNumber) -> Result<(), BookingError> {
        let login = require_login(ctx)?;
        self.registry.release_room(login, number, true).await
    }
}

fn require_login(ctx: &AuthContext) -> Result<&str, BookingError> {
    ctx.login().ok_or(BookingError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeroom_core::types::UserId;
    use storeroom_database::MemoryRoomStore;

    fn service(rooms: u32) -> BookingService {
        let registry = RoomRegistry::new(Arc::new(MemoryRoomStore::seeded(rooms)));
        BookingService::new(Arc::new(registry), "Reserved")
    }

    fn user(login: &str) -> AuthContext {
        AuthContext::user(UserId::new(), login)
    }

    #[tokio::test]
    async fn test_anonymous_cannot_mutate() {
        let service = service(10);
        let anon = AuthContext::Anonymous;

        for result in [
            service.book(&anon, 1).await,
            service.cancel(&anon, 1).await,
            service.release(&anon, 1).await,
        ] {
            assert!(matches!(result, Err(BookingError::Unauthenticated)));
        }
        assert_eq!(
            service.list_for_viewer(&anon).await.expect("list").occupied,
            0
        );
    }

    #[tokio::test]
    async fn test_room_handed_over_after_cancellation() {
        let service = service(10);
        let bob = user("bob");
        let alice = user("alice");

        service.book(&bob, 7).await.expect("bob books");
        let err = service.book(&alice, 7).await.expect_err("occupied");
        assert!(matches!(err, BookingError::RoomOccupied(7)));

        service.cancel(&bob, 7).await.expect("bob cancels");
        service.book(&alice, 7).await.expect("alice books");

        let listing = service.list_for_viewer(&alice).await.expect("list");
        let room = listing.rooms.iter().find(|r| r.number == 7).expect("room 7");
        assert_eq!(room.tenant.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_sixth_booking_exceeds_quota() {
        let service = service(10);
        let carol = user("carol");

        for n in 1..=5 {
            service.book(&carol, n).await.expect("within quota");
        }
        let err = service.book(&carol, 6).await.expect_err("quota");
        assert!(matches!(err, BookingError::QuotaExceeded { limit: 5 }));
        assert_eq!(
            service.registry().count_booked_by("carol").await.expect("count"),
            5
        );

        service.release(&carol, 3).await.expect("release one");
        service.book(&carol, 6).await.expect("room freed up quota");
    }

    #[tokio::test]
    async fn test_anonymous_listing_is_redacted() {
        let service = service(5);
        service.book(&user("dave"), 3).await.expect("book");

        let listing = service
            .list_for_viewer(&AuthContext::Anonymous)
            .await
            .expect("list");
        assert_eq!(listing.occupied, 1);
        assert_eq!(listing.free, 4);
        for room in &listing.rooms {
            let expected = (room.number == 3).then_some("Reserved");
            assert_eq!(room.tenant.as_deref(), expected);
        }
    }

    #[tokio::test]
    async fn test_authenticated_listing_shows_tenants() {
        let service = service(5);
        service.book(&user("dave"), 3).await.expect("book");

        let listing = service.list_for_viewer(&user("eve")).await.expect("list");
        let room = listing.rooms.iter().find(|r| r.number == 3).expect("room 3");
        assert_eq!(room.tenant.as_deref(), Some("dave"));
        assert_eq!(listing.free + listing.occupied, listing.rooms.len());
    }

    #[tokio::test]
    async fn test_release_of_free_room_succeeds() {
        let service = service(5);
        let eve = user("eve");
        service.release(&eve, 2).await.expect("no-op release");
        service.cancel(&eve, 2).await.expect("no-op cancel");
        assert_eq!(service.list_for_viewer(&eve).await.expect("list").free, 5);
    }

    #[tokio::test]
    async fn test_cancel_by_other_user_is_rejected() {
        let service = service(5);
        service.book(&user("bob"), 1).await.expect("book");

        let err = service.cancel(&user("alice"), 1).await.expect_err("not owner");
        assert!(matches!(err, BookingError::NotOwner(1)));
        let err = service.release(&user("alice"), 1).await.expect_err("not owner");
        assert!(matches!(err, BookingError::NotOwner(1)));
    }
}
