//! Boundary validation for caller-supplied fields.

use domains::{DomainError, DomainResult, ReportId};

/// Returns the field value when present and not blank.
pub(crate) fn required(field: &'static str, value: Option<String>) -> DomainResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(DomainError::ValidationFailed(format!("{field} must not be blank"))),
        None => Err(DomainError::ValidationFailed(format!("{field} is required"))),
    }
}

/// Parses a raw path segment into a `ReportId`.
pub(crate) fn report_id(raw: &str) -> Option<ReportId> {
    raw.parse::<ReportId>().ok()
}
