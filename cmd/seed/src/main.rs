//! # seed
//!
//! Rebuilds the schema from scratch and inserts sample reports.
//! Reads the same `DATABASE_URL` as the server.

use anyhow::Context;
use configs::Settings;
use domains::{NewComment, NewReport};
use secrecy::ExposeSecret;
use tracing::info;

fn sample_reports() -> Vec<(NewReport, Vec<&'static str>)> {
    vec![
        (
            NewReport {
                title: "floating patronus".into(),
                location: "hogwarts".into(),
                description: "it seemed to have somewhat of a glow to it".into(),
                password: "ExpectoPatronum".into(),
            },
            vec!["definitely a stag", "looked more like an otter to me"],
        ),
        (
            NewReport {
                title: "lights over the marsh".into(),
                location: "the dead marshes".into(),
                description: "pale candles drifting just under the water".into(),
                password: "DontFollowTheLights".into(),
            },
            vec![],
        ),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = configs::load_dotenv();
    let settings = Settings::load().context("failed to load settings")?;
    tracing_subscriber::fmt().with_env_filter("info").init();
    dotenv.log();

    let repo = storage_adapters::rebuild(settings.database_url.expose_secret())
        .await
        .context("failed to rebuild database")?;

    for (report, comments) in sample_reports() {
        let created = repo.create_report(report).await?;
        for content in comments {
            repo.create_comment(created.id, NewComment { content: content.into() })
                .await?;
        }
        info!(report_id = %created.id, title = %created.title, "seeded report");
    }

    info!("database rebuilt");
    Ok(())
}
