//! Typed path parameter extractors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use storeroom_core::error::AppError;
use storeroom_entity::room::RoomNumber;

use crate::error::ApiError;

/// Room number taken from the single path parameter.
///
/// A non-numeric segment is a validation error rendered as JSON.
#[derive(Debug, Clone, Copy)]
pub struct RoomNumberPath(pub RoomNumber);

impl<S> FromRequestParts<S> for RoomNumberPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(number) = Path::<RoomNumber>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid room number: {}", e.body_text())))?;
        Ok(Self(number))
    }
}
