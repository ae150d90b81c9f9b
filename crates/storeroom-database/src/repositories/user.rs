//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use storeroom_core::error::{AppError, ErrorKind};
use storeroom_core::result::AppResult;
use storeroom_entity::user::{CreateUser, User};

use crate::store::UserStore;

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, login, password_hash, created_at FROM users WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by login", e))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let user = data.into_user();
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, login, password_hash, created_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, login, password_hash, created_at",
        )
        .bind(user.id)
        .bind(&user.login)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate =
                matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());
            if duplicate {
                AppError::with_source(
                    ErrorKind::Conflict,
                    format!("User '{}' already exists", user.login),
                    e,
                )
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create user", e)
            }
        })
    }

    async fn list_logins(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar("SELECT login FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }
}
