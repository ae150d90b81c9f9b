//! Room listing and booking handlers.

use axum::Json;
use axum::extract::State;

use storeroom_service::RoomListing;

use crate::dto::response::ResultResponse;
use crate::error::ApiError;
use crate::extractors::{RoomNumberPath, Viewer};
use crate::state::AppState;

/// GET /rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    Viewer(ctx): Viewer,
) -> Result<Json<RoomListing>, ApiError> {
    let listing = state.bookings.list_for_viewer(&ctx).await?;
    Ok(Json(listing))
}

/// POST /rooms/booking/{number}
pub async fn book_room(
    State(state): State<AppState>,
    Viewer(ctx): Viewer,
    RoomNumberPath(number): RoomNumberPath,
) -> Result<Json<ResultResponse>, ApiError> {
    state.bookings.book(&ctx, number).await?;
    Ok(Json(ResultResponse::new(format!("Room {number} booked"))))
}

/// POST /rooms/cancellation/{number}
pub async fn cancel_booking(
    State(state): State<AppState>,
    Viewer(ctx): Viewer,
    RoomNumberPath(number): RoomNumberPath,
) -> Result<Json<ResultResponse>, ApiError> {
    state.bookings.cancel(&ctx, number).await?;
    Ok(Json(ResultResponse::new(format!(
        "Booking of room {number} cancelled"
    ))))
}

/// POST /rooms/release/{number}
pub async fn release_room(
    State(state): State<AppState>,
    Viewer(ctx): Viewer,
    RoomNumberPath(number): RoomNumberPath,
) -> Result<Json<ResultResponse>, ApiError> {
    state.bookings.release(&ctx, number).await?;
    Ok(Json(ResultResponse::new(format!("Room {number} released"))))
}
