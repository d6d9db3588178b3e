//! Environment-driven server configuration.
//!
//! # Responsibility
//! - Read bind address, database location, logging, and body limits.
//! - Fail startup on malformed values instead of silently using defaults.

use franchise_core::{default_log_level, LogTarget};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_BIND_ADDR: &str = "FRANCHISE_BIND_ADDR";
pub const ENV_DB_PATH: &str = "FRANCHISE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "FRANCHISE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "FRANCHISE_LOG_DIR";
pub const ENV_MAX_BODY_BYTES: &str = "FRANCHISE_MAX_BODY_BYTES";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "franchises.sqlite3";
const IN_MEMORY_DB: &str = ":memory:";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Where the franchise documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    /// Process-local store, discarded on exit.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseLocation,
    pub log_level: String,
    pub log_target: LogTarget,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_text = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_text.parse::<SocketAddr>().map_err(|err| ConfigError {
            variable: ENV_BIND_ADDR,
            message: format!("`{bind_text}` is not a socket address: {err}"),
        })?;

        let database = match get(ENV_DB_PATH).as_deref() {
            Some(IN_MEMORY_DB) => DatabaseLocation::Memory,
            Some(path) => DatabaseLocation::File(PathBuf::from(path)),
            None => DatabaseLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
        };

        let log_level = get(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());

        let log_target = match get(ENV_LOG_DIR) {
            Some(dir) => LogTarget::directory(&dir).map_err(|message| ConfigError {
                variable: ENV_LOG_DIR,
                message,
            })?,
            None => LogTarget::Stderr,
        };

        let max_body_bytes = match get(ENV_MAX_BODY_BYTES) {
            Some(text) => match text.parse::<usize>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => {
                    return Err(ConfigError {
                        variable: ENV_MAX_BODY_BYTES,
                        message: format!("`{text}` is not a positive byte count"),
                    })
                }
            },
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            bind_addr,
            database,
            log_level,
            log_target,
            max_body_bytes,
        })
    }
}
