//! # AppError
//!
//! Centralized error handling for the condo-laundry client.
//! Every failure a page controller can hit is one of these variants; the
//! controllers turn them into alerts or placeholder rows at the point of
//! occurrence.

use thiserror::Error;

/// The primary error type for all cl-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Backend answered 401/403: the admin session is gone.
    #[error("authorization expired (HTTP {0})")]
    AuthExpired(u16),

    /// Backend answered with any other non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Resource not found (e.g., a booking id missing from the personal list)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., malformed filter date, past booking date)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Slot already taken for that date and laundry
    #[error("conflict: {0}")]
    Conflict(String),

    /// Transport or decoding failure
    #[error("{0}")]
    Internal(String),
}

/// A specialized Result type for condo-laundry logic.
pub type Result<T> = std::result::Result<T, AppError>;
