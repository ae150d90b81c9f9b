//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use storeroom_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use storeroom_core::config::AppConfig;
use storeroom_database::{RoomStore, UserStore};
use storeroom_service::{AccountService, BookingService, RoomRegistry};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Room listing and booking
    pub bookings: BookingService,
    /// Registration, login, and token verification
    pub accounts: AccountService,
}

impl AppState {
    /// Wires services over the given stores.
    pub fn new(config: AppConfig, rooms: Arc<dyn RoomStore>, users: Arc<dyn UserStore>) -> Self {
        let registry = Arc::new(RoomRegistry::new(rooms));
        let bookings = BookingService::new(registry, config.booking.redaction_marker.clone());

        let accounts = AccountService::new(
            users,
            PasswordHasher::new(),
            JwtEncoder::new(&config.auth),
            JwtDecoder::new(&config.auth),
        );

        Self {
            config: Arc::new(config),
            bookings,
            accounts,
        }
    }
}
