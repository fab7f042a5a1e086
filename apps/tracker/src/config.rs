use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::storage::FileStore;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
/// Everything has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub state_dir: PathBuf,
    pub http_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let state_dir = match std::env::var("TRACKER_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => FileStore::default_dir()
                .context("Could not locate a config directory; set TRACKER_STATE_DIR")?,
        };

        let http_timeout_secs = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Config {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            state_dir,
            http_timeout: Duration::from_secs(http_timeout_secs),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}
