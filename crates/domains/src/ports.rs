//! # Core Traits (Ports)
//!
//! Any storage adapter must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::errors::DomainResult;
use crate::models::{Comment, NewComment, NewReport, Report, ReportId};

/// Data persistence contract for reports and their comments.
///
/// Each method maps to a single storage statement (listing issues one extra
/// statement to attach comments) and is atomic on its own.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// All reports with `is_open = true`, ordered by id, comments attached.
    async fn list_open_reports(&self) -> DomainResult<Vec<Report>>;

    /// Fetches a single report regardless of its open state.
    async fn get_report(&self, id: ReportId) -> DomainResult<Option<Report>>;

    /// Inserts a report; storage fills in id, timestamps and `is_open`.
    async fn create_report(&self, report: NewReport) -> DomainResult<Report>;

    /// Flips `is_open` to false iff the report exists, is open, and `password`
    /// matches exactly. Returns whether a row changed.
    async fn close_report(&self, id: ReportId, password: &str) -> DomainResult<bool>;

    /// Inserts a comment. An unknown `report_id` yields `DomainError::NotFound`.
    async fn create_comment(&self, report_id: ReportId, comment: NewComment) -> DomainResult<Comment>;

    /// Round-trips to storage; used as a readiness check at startup.
    async fn ping(&self) -> DomainResult<()>;
}
