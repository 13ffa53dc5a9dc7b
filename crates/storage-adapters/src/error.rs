//! Translation from sqlx failures into domain error kinds.

use domains::DomainError;
use sqlx::error::ErrorKind;
use tracing::error;

pub(crate) const STORAGE_UNAVAILABLE: &str = "database request failed";

/// Builds a mapper for `map_err`; the operation name goes to the log.
pub(crate) fn storage_error(op: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |err| classify(op, err)
}

fn classify(op: &'static str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        match db.kind() {
            ErrorKind::ForeignKeyViolation => {
                return DomainError::NotFound(format!("{op}: referenced report does not exist"));
            }
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                return DomainError::ValidationFailed(format!("{op}: {}", db.message()));
            }
            _ => {}
        }
    }

    // Driver text stays in the log; callers only see the fixed message.
    error!(operation = op, error = %err, "storage operation failed");
    DomainError::StorageUnavailable(STORAGE_UNAVAILABLE.into())
}
