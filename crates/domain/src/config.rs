//! Application configuration structures
//!
//! Populated by the infra config loader (environment variables first, then
//! config-file probing); consumed by the composition root.

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// Tracing filter directive used when `RUST_LOG` is absent.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// SQLite store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database file path.
    pub path: String,
    /// Connection pool size.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_pool_size() -> u32 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { database: DatabaseConfig::default(), log_level: default_log_level() }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "fieldops.db".to_string(), pool_size: default_pool_size() }
    }
}
