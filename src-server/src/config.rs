//! Server Configuration
//!
//! Read from `POTLUCK_*` environment variables. Unparsable values fall back
//! to the default with a warning; only the bind address is fatal.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_DB_PATH: &str = "potluck.db";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_MAX_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_LOG_MAX_FILES: usize = 5;
pub const DEFAULT_PAGE_LIMIT: u32 = 100;
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:5174",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_max_bytes: u64,
    pub log_max_files: usize,
    /// Page size when a list request names none
    pub page_limit: u32,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process env
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let bind_raw = lookup("POTLUCK_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| format!("invalid POTLUCK_BIND '{}': {}", bind_raw, e))?;

        Ok(Self {
            bind,
            db_path: lookup("POTLUCK_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            log_dir: lookup("POTLUCK_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            log_max_bytes: env_parsed(&lookup, "POTLUCK_LOG_MAX_BYTES", DEFAULT_LOG_MAX_BYTES),
            log_max_files: env_parsed(&lookup, "POTLUCK_LOG_MAX_FILES", DEFAULT_LOG_MAX_FILES),
            page_limit: env_parsed(&lookup, "POTLUCK_PAGE_LIMIT", DEFAULT_PAGE_LIMIT),
            cors_origins: match lookup("POTLUCK_CORS_ORIGINS") {
                Some(raw) => env_list(&raw),
                None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            },
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_max_bytes: DEFAULT_LOG_MAX_BYTES,
            log_max_files: DEFAULT_LOG_MAX_FILES,
            page_limit: DEFAULT_PAGE_LIMIT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

fn env_parsed<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(name) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(var = name, value = %raw, default = %default, "ignoring invalid setting");
                default
            }
        },
    }
}

fn env_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
