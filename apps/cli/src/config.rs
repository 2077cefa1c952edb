use std::path::PathBuf;

use anyhow::{Context, Result};

/// Base URL used when `SEOSCRIBE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Application configuration loaded from environment variables.
/// Every variable has a default; nothing is required.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout_ms: u64,
    pub state_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: std::env::var("SEOSCRIBE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout_ms: std::env::var("SEOSCRIBE_TIMEOUT_MS")
                .unwrap_or_else(|_| "20000".to_string())
                .parse::<u64>()
                .context("SEOSCRIBE_TIMEOUT_MS must be a number of milliseconds")?,
            state_dir: match std::env::var("SEOSCRIBE_STATE_DIR") {
                Ok(dir) => PathBuf::from(dir),
                Err(_) => dirs::data_local_dir()
                    .context("could not determine a local data directory")?
                    .join("seoscribe"),
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
