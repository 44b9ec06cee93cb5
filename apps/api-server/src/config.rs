//! Server configuration.

use std::{env, path::PathBuf};

use task_store::{BackendName, StoreConfig};

/// Default location of the SQLite data file, relative to the working directory.
pub const DEFAULT_SQLITE_PATH: &str = "backend/tasks.db";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Storage backend settings.
    pub store: StoreConfig,
    /// Origins allowed to call `/api/*` from a browser.
    pub cors_origins: Vec<String>,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let requested = non_blank("FORCE_BACKEND")
            .map(|name| name.parse::<BackendName>())
            .transpose()?;

        let port = match non_blank("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got '{port}'"))?,
            None => 5000,
        };

        let cors_origins = non_blank("TASKS_CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5500".to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            host: non_blank("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            store: StoreConfig {
                requested,
                database_url: non_blank("DATABASE_URL").map(|u| u.trim().to_string()),
                sqlite_path: non_blank("TASKS_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SQLITE_PATH)),
            },
            cors_origins,
            log_level: non_blank("TASKS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
