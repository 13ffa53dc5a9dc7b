//! # Domain Models
//!
//! These structs represent the core entities of report-board.
//! Identifiers are storage-generated integers. JSON uses camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message returned after a report has been closed.
pub const CLOSE_CONFIRMATION: &str = "Report successfully closed!";

/// Storage-generated identifier of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub i32);

impl ReportId {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReportId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(ReportId)
    }
}

/// A sighting or incident record with an open/closed lifecycle.
///
/// There is deliberately no password field: the secret stays in storage and
/// can never end up in a response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub location: String,
    pub description: String,
    pub is_open: bool,
    /// Set by storage to creation time plus the retention window
    pub expiration_date: DateTime<Utc>,
    /// Derived on read from `expiration_date`
    pub is_expired: bool,
    pub created_at: DateTime<Utc>,
    /// Filled in when reports are listed; empty on create
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Report {
    /// Whether the report's discussion window has passed at `now`.
    pub fn expired_at(expiration_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        expiration_date < now
    }
}

/// A free-text annotation attached to exactly one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub report_id: ReportId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Raw report fields as they arrive from a caller. Every field is optional so
/// that a malformed body reaches validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportDraft {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub password: Option<String>,
}

/// Raw comment fields as they arrive from a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    pub content: Option<String>,
}

/// Validated input for inserting a report.
#[derive(Clone, PartialEq, Eq)]
pub struct NewReport {
    pub title: String,
    pub location: String,
    pub description: String,
    pub password: String,
}

// Manual impl keeps the password out of logs.
impl fmt::Debug for NewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewReport")
            .field("title", &self.title)
            .field("location", &self.location)
            .field("description", &self.description)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated input for inserting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
}

/// Body returned by a successful close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseConfirmation {
    pub message: String,
}

impl Default for CloseConfirmation {
    fn default() -> Self {
        Self {
            message: CLOSE_CONFIRMATION.to_string(),
        }
    }
}
