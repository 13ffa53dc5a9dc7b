//! # SQLite adapter
//!
//! Implements `ReportRepository` on a `SqlitePool`. Timestamps are stored as
//! RFC 3339 text so they decode straight into `DateTime<Utc>`.
//!
//! An in-memory database only lives as long as its connection, so `:memory:`
//! URLs get a single connection that is never recycled.

use std::str::FromStr;

use async_trait::async_trait;
use domains::{Comment, DomainResult, NewComment, NewReport, Report, ReportId, ReportRepository};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::error::storage_error;
use crate::rows::{assemble, CommentRow, ReportRow, COMMENT_COLUMNS, REPORT_COLUMNS};

pub struct SqliteReportRepository {
    pool: SqlitePool,
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

impl SqliteReportRepository {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(options)
                .await?
        };

        Ok(Self { pool })
    }

    /// Fresh, migrated in-memory database.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let repo = Self::connect("sqlite::memory:", 1).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await
    }

    /// Drops all tables, including the migration ledger.
    pub async fn reset(&self) -> Result<(), sqlx::Error> {
        for table in ["comments", "reports", "_sqlx_migrations"] {
            sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for SqliteReportRepository {
    async fn list_open_reports(&self) -> DomainResult<Vec<Report>> {
        let reports: Vec<ReportRow> = sqlx::query_as(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE is_open = 1 ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list_open_reports"))?;

        let comments: Vec<CommentRow> = sqlx::query_as(
            "SELECT c.id, c.report_id, c.content, c.created_at \
             FROM comments c JOIN reports r ON r.id = c.report_id \
             WHERE r.is_open = 1 ORDER BY c.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list_open_reports"))?;

        debug!(reports = reports.len(), comments = comments.len(), "fetched open reports");
        Ok(assemble(reports, comments))
    }

    async fn get_report(&self, id: ReportId) -> DomainResult<Option<Report>> {
        let row: Option<ReportRow> =
            sqlx::query_as(&format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error("get_report"))?;

        Ok(row.map(Report::from))
    }

    async fn create_report(&self, report: NewReport) -> DomainResult<Report> {
        let row: ReportRow = sqlx::query_as(&format!(
            "INSERT INTO reports (title, location, description, password) \
             VALUES (?, ?, ?, ?) RETURNING {REPORT_COLUMNS}"
        ))
        .bind(report.title)
        .bind(report.location)
        .bind(report.description)
        .bind(report.password)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error("create_report"))?;

        Ok(row.into())
    }

    async fn close_report(&self, id: ReportId, password: &str) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE reports SET is_open = 0 WHERE id = ? AND is_open = 1 AND password = ?",
        )
        .bind(id.get())
        .bind(password)
        .execute(&self.pool)
        .await
        .map_err(storage_error("close_report"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn create_comment(&self, report_id: ReportId, comment: NewComment) -> DomainResult<Comment> {
        let row: CommentRow = sqlx::query_as(&format!(
            "INSERT INTO comments (report_id, content) VALUES (?, ?) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(report_id.get())
        .bind(comment.content)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error("create_comment"))?;

        Ok(row.into())
    }

    async fn ping(&self) -> DomainResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(storage_error("ping"))?;
        Ok(())
    }
}
