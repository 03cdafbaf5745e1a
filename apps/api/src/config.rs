use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ADVICE_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Selects the Postgres reference store when set.
    pub database_url: Option<String>,
    /// JSON catalogue to serve instead of the bundled one (ignored when
    /// `database_url` is set).
    pub reference_data_path: Option<PathBuf>,
    /// Without a key every advice call degrades to the fallback message.
    pub openai_api_key: Option<String>,
    pub advice_api_url: String,
    pub advice_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            database_url: optional_env("DATABASE_URL"),
            reference_data_path: optional_env("REFERENCE_DATA_PATH").map(PathBuf::from),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            advice_api_url: optional_env("ADVICE_API_URL")
                .unwrap_or_else(|| DEFAULT_ADVICE_API_URL.to_string()),
            advice_timeout: Duration::from_secs(
                std::env::var("ADVICE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse::<u64>()
                    .context("ADVICE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }
}

/// Unset and blank are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
