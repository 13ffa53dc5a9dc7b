//! # storage-adapters
//!
//! Relational implementations of the `ReportRepository` port.
//! Backends are compiled-to-order: enable `db-postgres`, `db-sqlite`, or both,
//! and the connection URL scheme picks one at runtime.

mod error;
mod rows;

#[cfg(feature = "db-postgres")]
pub mod postgres;
#[cfg(feature = "db-sqlite")]
pub mod sqlite;

use std::sync::Arc;

use anyhow::{bail, Context};
use domains::ReportRepository;

#[cfg(feature = "db-postgres")]
pub use postgres::PgReportRepository;
#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteReportRepository;

/// Which backend a connection URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Backend::Postgres)
        } else if url.starts_with("sqlite:") {
            Some(Backend::Sqlite)
        } else {
            None
        }
    }
}

/// Connects to the database at `url`, applies pending migrations, and
/// returns the repository behind the port trait.
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Arc<dyn ReportRepository>> {
    match Backend::from_url(url) {
        #[cfg(feature = "db-postgres")]
        Some(Backend::Postgres) => {
            let repo = PgReportRepository::connect(url, max_connections)
                .await
                .context("failed to connect to Postgres")?;
            repo.migrate().await.context("failed to run Postgres migrations")?;
            Ok(Arc::new(repo))
        }
        #[cfg(feature = "db-sqlite")]
        Some(Backend::Sqlite) => {
            let repo = SqliteReportRepository::connect(url, max_connections)
                .await
                .context("failed to open SQLite database")?;
            repo.migrate().await.context("failed to run SQLite migrations")?;
            Ok(Arc::new(repo))
        }
        #[allow(unreachable_patterns)]
        Some(backend) => bail!("{backend:?} support was not compiled into this build"),
        None => bail!("unsupported database URL scheme"),
    }
}

/// Drops every table and re-applies migrations. Used by the seeder.
pub async fn rebuild(url: &str) -> anyhow::Result<Arc<dyn ReportRepository>> {
    match Backend::from_url(url) {
        #[cfg(feature = "db-postgres")]
        Some(Backend::Postgres) => {
            let repo = PgReportRepository::connect(url, 1).await?;
            repo.reset().await.context("failed to drop tables")?;
            repo.migrate().await?;
            Ok(Arc::new(repo))
        }
        #[cfg(feature = "db-sqlite")]
        Some(Backend::Sqlite) => {
            let repo = SqliteReportRepository::connect(url, 1).await?;
            repo.reset().await.context("failed to drop tables")?;
            repo.migrate().await?;
            Ok(Arc::new(repo))
        }
        #[allow(unreachable_patterns)]
        Some(backend) => bail!("{backend:?} support was not compiled into this build"),
        None => bail!("unsupported database URL scheme"),
    }
}
