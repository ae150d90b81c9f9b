//! In-memory stores for single-node deployments and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use storeroom_core::error::AppError;
use storeroom_core::result::AppResult;
use storeroom_entity::room::{Room, RoomNumber};
use storeroom_entity::user::{CreateUser, User};

use crate::store::{RoomStore, UserStore};

/// Room table held in a `BTreeMap` keyed by room number.
///
/// State is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    rooms: RwLock<BTreeMap<RoomNumber, Option<String>>>,
}

impl MemoryRoomStore {
    /// Creates a store holding the given free rooms.
    pub fn with_rooms(numbers: impl IntoIterator<Item = RoomNumber>) -> Self {
        let rooms: BTreeMap<_, _> = numbers.into_iter().map(|n| (n, None)).collect();
        info!(rooms = rooms.len(), "Provisioned in-memory room table");
        Self {
            rooms: RwLock::new(rooms),
        }
    }

    /// Creates a store holding free rooms numbered `1..=count`.
    pub fn seeded(count: u32) -> Self {
        let last = RoomNumber::try_from(count).unwrap_or(RoomNumber::MAX);
        Self::with_rooms(1..=last)
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn list_rooms(&self) -> AppResult<Vec<Room>> {
        let rooms = self.rooms.read().await;
        Ok(rooms
            .iter()
            .map(|(number, tenant)| Room {
                number: *number,
                tenant: tenant.clone(),
            })
            .collect())
    }

    async fn get_room(&self, number: RoomNumber) -> AppResult<Option<Room>> {
        let rooms = self.rooms.read().await;
        Ok(rooms.get(&number).map(|tenant| Room {
            number,
            tenant: tenant.clone(),
        }))
    }

    async fn set_tenant(&self, number: RoomNumber, tenant: Option<&str>) -> AppResult<bool> {
        let mut rooms = self.rooms.write().await;
        match rooms.get_mut(&number) {
            Some(slot) => {
                *slot = tenant.map(str::to_owned);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_by_tenant(&self, tenant: &str) -> AppResult<usize> {
        let rooms = self.rooms.read().await;
        Ok(rooms
            .values()
            .filter(|t| t.as_deref() == Some(tenant))
            .count())
    }
}

/// Registered users kept in registration order.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    /// Creates an empty user store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.login == login).cloned())
    }

    async fn create(&self, user: CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.login == user.login) {
            return Err(AppError::conflict(format!(
                "User '{}' already exists",
                user.login
            )));
        }
        let user = user.into_user();
        users.push(user.clone());
        Ok(user)
    }

    async fn list_logins(&self) -> AppResult<Vec<String>> {
        let users = self.users.read().await;
        Ok(users.iter().map(|u| u.login.clone()).collect())
    }
}
