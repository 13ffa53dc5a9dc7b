//! # DomainError
//!
//! Centralized error handling for report-board.
//! Every failure a port or service can produce maps to one of these kinds;
//! the HTTP boundary decides how much of the distinction to expose.

use thiserror::Error;

/// The primary error type for all domain and service operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Referenced resource does not exist (e.g. comment on an unknown report)
    #[error("not found: {0}")]
    NotFound(String),

    /// Password-gated operation refused
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Missing or blank required field, or a storage constraint rejected the row
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Infrastructure failure (connection lost, pool exhausted, query failed)
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl DomainError {
    /// True when the failure was caused by the request rather than the infrastructure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::StorageUnavailable(_))
    }
}

/// A specialized Result type for report-board logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
