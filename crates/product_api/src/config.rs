//! Server configuration loaded from the environment.
//!
//! # Responsibility
//! - Read `PRODUCT_API_*` variables (after an optional `.env` file).
//! - Apply defaults and reject malformed values up front.

use product_core::default_log_level;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_FILE_NAME: &str = "product_api.sqlite3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} value `{value}`: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<String>,
    /// Development only: wipe and reseed the database on startup.
    pub reset_db: bool,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = get("PRODUCT_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("PRODUCT_API_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|err| ConfigError::Invalid {
                var: "PRODUCT_API_PORT",
                value: raw.clone(),
                reason: err.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let db_path = get("PRODUCT_API_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level =
            get("PRODUCT_API_LOG_LEVEL").unwrap_or_else(|| default_log_level().to_string());
        let log_dir = get("PRODUCT_API_LOG_DIR");

        let reset_db = match get("PRODUCT_API_RESET_DB") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
                var: "PRODUCT_API_RESET_DB",
                value: raw.clone(),
                reason: "expected true|false|1|0".to_string(),
            })?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            db_path,
            log_level,
            log_dir,
            reset_db,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
