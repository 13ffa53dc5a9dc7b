//! # Postgres adapter
//!
//! Implements `ReportRepository` on a shared `PgPool`.

use std::time::Duration;

use async_trait::async_trait;
use domains::{Comment, DomainResult, NewComment, NewReport, Report, ReportId, ReportRepository};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use crate::error::storage_error;
use crate::rows::{assemble, CommentRow, ReportRow, COMMENT_COLUMNS, REPORT_COLUMNS};

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations/postgres").run(&self.pool).await
    }

    /// Drops all tables, including the migration ledger.
    pub async fn reset(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DROP TABLE IF EXISTS comments, reports, _sqlx_migrations")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn list_open_reports(&self) -> DomainResult<Vec<Report>> {
        let reports: Vec<ReportRow> = sqlx::query_as(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE is_open ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list_open_reports"))?;

        let comments: Vec<CommentRow> = sqlx::query_as(
            "SELECT c.id, c.report_id, c.content, c.created_at \
             FROM comments c JOIN reports r ON r.id = c.report_id \
             WHERE r.is_open ORDER BY c.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list_open_reports"))?;

        debug!(reports = reports.len(), comments = comments.len(), "fetched open reports");
        Ok(assemble(reports, comments))
    }

    async fn get_report(&self, id: ReportId) -> DomainResult<Option<Report>> {
        let row: Option<ReportRow> =
            sqlx::query_as(&format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error("get_report"))?;

        Ok(row.map(Report::from))
    }

    async fn create_report(&self, report: NewReport) -> DomainResult<Report> {
        let row: ReportRow = sqlx::query_as(&format!(
            "INSERT INTO reports (title, location, description, password) \
             VALUES ($1, $2, $3, $4) RETURNING {REPORT_COLUMNS}"
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
            "UPDATE reports SET is_open = false WHERE id = $1 AND is_open AND password = $2",
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
            "INSERT INTO comments (report_id, content) VALUES ($1, $2) RETURNING {COMMENT_COLUMNS}"
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
