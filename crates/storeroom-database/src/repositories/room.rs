//! Room repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use storeroom_core::error::{AppError, ErrorKind};
use storeroom_core::result::AppResult;
use storeroom_entity::room::{Room, RoomNumber};

use crate::store::RoomStore;

/// Repository for the `rooms` table.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert free rooms `1..=count` that do not exist yet.
    ///
    /// Existing rows, including their tenants, are left untouched.
    pub async fn provision(&self, count: u32) -> AppResult<u64> {
        let last = i32::try_from(count).unwrap_or(i32::MAX);
        let inserted = sqlx::query(
            "INSERT INTO rooms (number, tenant) \
             SELECT n, NULL FROM generate_series(1, $1) AS n \
             ON CONFLICT (number) DO NOTHING",
        )
        .bind(last)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to provision rooms", e))?
        .rows_affected();

        info!(inserted, total = count, "Provisioned rooms");
        Ok(inserted)
    }
}

#[async_trait]
impl RoomStore for RoomRepository {
    async fn list_rooms(&self) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>("SELECT number, tenant FROM rooms ORDER BY number")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))
    }

    async fn get_room(&self, number: RoomNumber) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT number, tenant FROM rooms WHERE number = $1")
            .bind(number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }

    async fn set_tenant(&self, number: RoomNumber, tenant: Option<&str>) -> AppResult<bool> {
        let result = sqlx::query("UPDATE rooms SET tenant = $1 WHERE number = $2")
            .bind(tenant)
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update room tenant", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_tenant(&self, tenant: &str) -> AppResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE tenant = $1")
            .bind(tenant)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count tenant rooms", e)
            })?;

        Ok(usize::try_from(count).unwrap_or(0))
    }
}
