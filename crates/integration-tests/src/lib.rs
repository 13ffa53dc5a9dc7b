//! # integration-tests
//!
//! Shared fixture: the real router over a fresh in-memory SQLite database,
//! with direct pool access for checking what actually landed in storage.

use std::net::SocketAddr;
use std::sync::Arc;

use api_adapters::{build_router, AppState};
use axum::Router;
use domains::{ReportId, ReportRepository};
use storage_adapters::SqliteReportRepository;
use tokio::net::TcpListener;

pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub struct TestApp {
    pub repo: Arc<SqliteReportRepository>,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let repo = Arc::new(SqliteReportRepository::in_memory().await?);
        let router = build_router(AppState::new(repo.clone()), MAX_BODY_BYTES);
        Ok(Self { repo, router })
    }

    /// Inserts the canonical open report straight into storage.
    pub async fn seed_patronus(&self) -> anyhow::Result<ReportId> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO reports (title, location, description, password, is_open) \
             VALUES (?, ?, ?, ?, 1) RETURNING id",
        )
        .bind("floating patronus")
        .bind("hogwarts")
        .bind("it seemed to have somewhat of a glow to it")
        .bind("ExpectoPatronum")
        .fetch_one(self.repo.pool())
        .await?;
        Ok(ReportId(id))
    }

    /// Reads a report back through the repository, bypassing the HTTP layer.
    pub async fn stored_is_open(&self, id: ReportId) -> anyhow::Result<bool> {
        let report = self
            .repo
            .get_report(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("report {id} is not stored"))?;
        Ok(report.is_open)
    }

    /// Reads `(title, location, description, is_open)` straight from the table.
    pub async fn stored_row(&self, id: ReportId) -> anyhow::Result<(String, String, String, bool)> {
        let row = sqlx::query_as(
            "SELECT title, location, description, is_open FROM reports WHERE id = ?",
        )
        .bind(id.get())
        .fetch_one(self.repo.pool())
        .await?;
        Ok(row)
    }

    pub async fn stored_report_count(&self) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(self.repo.pool())
            .await?;
        Ok(count)
    }

    /// Serves the router on an ephemeral local port until the test runtime stops.
    pub async fn spawn(&self) -> anyhow::Result<SocketAddr> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let router = self.router.clone();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(addr)
    }
}
