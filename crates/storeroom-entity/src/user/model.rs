//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storeroom_core::types::UserId;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name; this is the identity recorded as a room tenant.
    pub login: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired login.
    pub login: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

impl CreateUser {
    /// Materialize the row that will be stored for this request.
    pub fn into_user(self) -> User {
        User {
            id: UserId::new(),
            login: self.login,
            password_hash: self.password_hash,
            created_at: Utc::now(),
        }
    }
}
