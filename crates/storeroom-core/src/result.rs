//! Convenience result type alias for Storeroom.

use crate::error::AppError;

/// A specialized `Result` type for Storeroom operations.
pub type AppResult<T> = Result<T, AppError>;
