//! # ReportService
//!
//! Orchestrates the report lifecycle: validation happens here, persistence is
//! delegated to the injected `ReportRepository`.

use std::sync::Arc;

use domains::{
    CloseConfirmation, Comment, CommentDraft, DomainError, DomainResult, NewComment, NewReport,
    Report, ReportDraft, ReportRepository,
};
use tracing::{info, instrument, warn};

use crate::validation::{report_id, required};

/// Returned for every refused close so callers cannot probe which reports exist.
pub const CLOSE_REFUSED: &str =
    "report does not exist, is already closed, or the password is incorrect";

#[derive(Clone)]
pub struct ReportService {
    repo: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }

    /// Every open report, password-free, with comments attached.
    #[instrument(skip(self))]
    pub async fn list_open_reports(&self) -> DomainResult<Vec<Report>> {
        self.repo.list_open_reports().await
    }

    #[instrument(skip(self, draft))]
    pub async fn create_report(&self, draft: ReportDraft) -> DomainResult<Report> {
        let new_report = NewReport {
            title: required("title", draft.title)?,
            location: required("location", draft.location)?,
            description: required("description", draft.description)?,
            password: required("password", draft.password)?,
        };

        let report = self.repo.create_report(new_report).await?;
        info!(report_id = %report.id, "report created");
        Ok(report)
    }

    /// Closes a report when `password` matches. Unknown ids, closed reports
    /// and wrong passwords all produce the same `Unauthorized` error.
    #[instrument(skip(self, password))]
    pub async fn close_report(
        &self,
        raw_id: &str,
        password: Option<String>,
    ) -> DomainResult<CloseConfirmation> {
        let refused = || DomainError::Unauthorized(CLOSE_REFUSED.to_string());

        let Some(id) = report_id(raw_id) else {
            warn!("close refused: malformed report id");
            return Err(refused());
        };
        let Some(password) = password else {
            warn!(report_id = %id, "close refused: no password supplied");
            return Err(refused());
        };

        if !self.repo.close_report(id, &password).await? {
            warn!(report_id = %id, "close refused");
            return Err(refused());
        }

        info!(report_id = %id, "report closed");
        Ok(CloseConfirmation::default())
    }

    /// Adds a comment. The report's open state is not checked; an unknown id
    /// is rejected by storage.
    #[instrument(skip(self, draft))]
    pub async fn create_comment(&self, raw_id: &str, draft: CommentDraft) -> DomainResult<Comment> {
        let id = report_id(raw_id)
            .ok_or_else(|| DomainError::NotFound(format!("report {raw_id}")))?;
        let content = required("content", draft.content)?;

        let comment = self.repo.create_comment(id, NewComment { content }).await?;
        info!(report_id = %id, comment_id = comment.id, "comment created");
        Ok(comment)
    }
}
