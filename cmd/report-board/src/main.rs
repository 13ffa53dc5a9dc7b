//! # report-board
//!
//! The entry point that assembles the application based on compile-time features.

use anyhow::Context;
use api_adapters::{build_router, AppState};
use configs::{LogFormat, Settings};
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env and settings first so RUST_LOG from .env reaches the subscriber
    let dotenv = configs::load_dotenv();
    let settings = Settings::load().context("failed to load settings")?;
    init_tracing(settings.log_format);
    dotenv.log();

    // 1. Bind the listener
    let listener = TcpListener::bind(settings.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_address()))?;

    // 2. Connect storage; the process does not serve without it
    let repo = storage_adapters::connect(
        settings.database_url.expose_secret(),
        settings.database_max_connections,
    )
    .await?;
    repo.ping().await.context("database is not answering")?;

    // 3. Assemble the router around the injected repository
    let app = build_router(AppState::new(repo), settings.max_body_bytes);

    info!(address = %listener.local_addr()?, "server is up and the database is connected");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,sqlx=warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
