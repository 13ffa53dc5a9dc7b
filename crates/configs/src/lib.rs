//! # configs
//!
//! Layered runtime settings for report-board.
//!
//! Sources, lowest precedence first: built-in defaults, the optional
//! `config/report-board.toml` file, then environment variables. Keys are the
//! lower-cased variable names: `DATABASE_URL` → `database_url`, `PORT` → `port`.
//!
//! A `.env` file is merged into the process environment by [`load_dotenv`],
//! which runs before the tracing subscriber exists; its outcome is returned
//! so the caller can log it once logging is up.

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config/report-board";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// What happened when looking for a `.env` file.
#[derive(Debug, PartialEq, Eq)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    Missing,
    Unreadable(String),
}

impl DotenvStatus {
    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => DotenvStatus::Loaded(path),
            Err(e) if e.not_found() => DotenvStatus::Missing,
            Err(e) => DotenvStatus::Unreadable(e.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            DotenvStatus::Missing => tracing::debug!("no .env file found"),
            DotenvStatus::Unreadable(error) => tracing::warn!(%error, "ignoring unreadable .env"),
        }
    }
}

/// Merges `.env` into the process environment. Existing variables win.
pub fn load_dotenv() -> DotenvStatus {
    DotenvStatus::from_result(dotenvy::dotenv())
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// `postgres://...` or `sqlite:...`
    pub database_url: SecretString,
    pub database_max_connections: u32,
    pub log_format: LogFormat,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
}

impl Settings {
    /// Builds settings from defaults, file, and process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(Environment::default().try_parsing(true))
    }

    /// Builds settings from an explicit variable map instead of the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::build(Environment::default().try_parsing(true).source(Some(vars)))
    }

    fn build(env: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("database_max_connections", 5)?
            .set_default("log_format", "pretty")?
            .set_default("max_body_bytes", 64 * 1024)?
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.expose_secret().trim().is_empty() {
            return Err(ConfigError::Invalid("DATABASE_URL must not be empty".into()));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
