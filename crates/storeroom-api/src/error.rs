//! Maps service errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storeroom_core::error::{AppError, ErrorKind};
use storeroom_service::BookingError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Any error a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Infrastructure, validation, or identity failure.
    #[error(transparent)]
    App(#[from] AppError),
    /// Booking rule rejection.
    #[error(transparent)]
    Booking(#[from] BookingError),
}

impl ApiError {
    /// Status code and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::App(err) => app_status(err),
            Self::Booking(BookingError::Storage(err)) => app_status(err),
            Self::Booking(err) => {
                let status = match err {
                    BookingError::Unauthenticated => StatusCode::UNAUTHORIZED,
                    BookingError::RoomNotFound(_) => StatusCode::NOT_FOUND,
                    BookingError::RoomOccupied(_) => StatusCode::BAD_REQUEST,
                    BookingError::QuotaExceeded { .. } | BookingError::NotOwner(_) => {
                        StatusCode::FORBIDDEN
                    }
                    BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.code())
            }
        }
    }
}

fn app_status(err: &AppError) -> (StatusCode, &'static str) {
    match err.kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Internal server error");
            "Internal server error".to_string()
        } else {
            match &self {
                Self::App(err) => err.message.clone(),
                Self::Booking(err) => err.to_string(),
            }
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
