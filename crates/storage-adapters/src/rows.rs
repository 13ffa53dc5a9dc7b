//! Row shapes shared by every backend and their mapping to domain models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use domains::{Comment, Report, ReportId};

/// Columns selected for a report. `password` is never read back.
pub(crate) const REPORT_COLUMNS: &str =
    "id, title, location, description, is_open, expiration_date, created_at";

pub(crate) const COMMENT_COLUMNS: &str = "id, report_id, content, created_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ReportRow {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub description: String,
    pub is_open: bool,
    pub expiration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ReportRow {
    pub(crate) fn into_report(self, now: DateTime<Utc>, comments: Vec<Comment>) -> Report {
        Report {
            id: ReportId(self.id),
            title: self.title,
            location: self.location,
            description: self.description,
            is_open: self.is_open,
            expiration_date: self.expiration_date,
            is_expired: Report::expired_at(self.expiration_date, now),
            created_at: self.created_at,
            comments,
        }
    }
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        row.into_report(Utc::now(), Vec::new())
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CommentRow {
    pub id: i32,
    pub report_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            report_id: ReportId(row.report_id),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Groups comments under their owning reports, preserving both orders.
pub(crate) fn assemble(reports: Vec<ReportRow>, comments: Vec<CommentRow>) -> Vec<Report> {
    let mut by_report: HashMap<i32, Vec<Comment>> = HashMap::new();
    for row in comments {
        by_report.entry(row.report_id).or_default().push(row.into());
    }

    let now = Utc::now();
    reports
        .into_iter()
        .map(|row| {
            let comments = by_report.remove(&row.id).unwrap_or_default();
            row.into_report(now, comments)
        })
        .collect()
}
