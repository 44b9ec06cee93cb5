//! Startup-time backend selection.
//!
//! Selection is split in two: [`select_backend`] is a pure decision over the
//! configuration and a few facts about the environment, and
//! [`BackendKind::open`] constructs the chosen store. The process opens exactly
//! one store and keeps it until it exits.

use std::{fmt, path::PathBuf, str::FromStr, sync::Arc};

use thiserror::Error;

use crate::{MemoryTaskStore, SqliteTaskStore, TaskStore, TaskStoreResult};

/// Whether this build carries the PostgreSQL backend.
pub const POSTGRES_SUPPORTED: bool = cfg!(feature = "postgres");

/// Backend names accepted as an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendName {
    Memory,
    Sqlite,
    Postgres,
}

impl BackendName {
    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendName::Memory => "memory",
            BackendName::Sqlite => "sqlite",
            BackendName::Postgres => "postgres",
        }
    }
}

impl fmt::Display for BackendName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendName {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(BackendName::Memory),
            "sqlite" => Ok(BackendName::Sqlite),
            "postgres" => Ok(BackendName::Postgres),
            other => Err(SelectError::UnknownBackend(other.to_string())),
        }
    }
}

/// Errors raised while choosing a backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Override names a backend that does not exist.
    #[error("unknown backend '{0}', expected one of: memory, sqlite, postgres")]
    UnknownBackend(String),

    /// Postgres was requested without a connection string.
    #[error("postgres backend requested but no database URL is configured")]
    MissingDatabaseUrl,

    /// Postgres was requested but this build does not include it.
    #[error("postgres backend requested but support was not compiled in")]
    PostgresUnsupported,
}

/// Storage configuration consumed by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Explicitly requested backend, if any.
    pub requested: Option<BackendName>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Location of the SQLite data file.
    pub sqlite_path: PathBuf,
}

/// The backend chosen for this process, with what it needs to be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Sqlite(PathBuf),
    Postgres(String),
}

impl BackendKind {
    /// Returns the backend's name.
    pub fn name(&self) -> BackendName {
        match self {
            BackendKind::Memory => BackendName::Memory,
            BackendKind::Sqlite(_) => BackendName::Sqlite,
            BackendKind::Postgres(_) => BackendName::Postgres,
        }
    }

    /// Constructs the store. Fails if the database cannot be opened or reached.
    pub async fn open(self) -> TaskStoreResult<Arc<dyn TaskStore>> {
        let store: Arc<dyn TaskStore> = match self {
            BackendKind::Memory => Arc::new(MemoryTaskStore::new()),
            BackendKind::Sqlite(path) => Arc::new(SqliteTaskStore::open(&path).await?),
            #[cfg(feature = "postgres")]
            BackendKind::Postgres(url) => Arc::new(crate::PostgresTaskStore::connect(&url).await?),
            #[cfg(not(feature = "postgres"))]
            BackendKind::Postgres(_) => return Err(SelectError::PostgresUnsupported.into()),
        };
        Ok(store)
    }
}

/// Chooses the backend for this process.
///
/// Order of preference:
/// 1. an explicit override,
/// 2. PostgreSQL when a database URL is set and support is compiled in,
/// 3. SQLite when its data file already exists,
/// 4. the in-memory store.
///
/// A PostgreSQL override that cannot be satisfied is an error rather than a
/// silent fallback.
pub fn select_backend(
    config: &StoreConfig,
    postgres_supported: bool,
    sqlite_file_exists: bool,
) -> Result<BackendKind, SelectError> {
    let database_url = config.database_url.as_deref().filter(|u| !u.trim().is_empty());

    match config.requested {
        Some(BackendName::Memory) => return Ok(BackendKind::Memory),
        Some(BackendName::Sqlite) => return Ok(BackendKind::Sqlite(config.sqlite_path.clone())),
        Some(BackendName::Postgres) => {
            let url = database_url.ok_or(SelectError::MissingDatabaseUrl)?;
            if !postgres_supported {
                return Err(SelectError::PostgresUnsupported);
            }
            return Ok(BackendKind::Postgres(url.to_string()));
        }
        None => {}
    }

    if let Some(url) = database_url.filter(|_| postgres_supported) {
        Ok(BackendKind::Postgres(url.to_string()))
    } else if sqlite_file_exists {
        Ok(BackendKind::Sqlite(config.sqlite_path.clone()))
    } else {
        Ok(BackendKind::Memory)
    }
}

/// Runs [`select_backend`] against the real build and filesystem.
pub fn detect_backend(config: &StoreConfig) -> Result<BackendKind, SelectError> {
    select_backend(config, POSTGRES_SUPPORTED, config.sqlite_path.is_file())
}

/// Selects and opens the store for this process.
pub async fn open_store(config: &StoreConfig) -> TaskStoreResult<Arc<dyn TaskStore>> {
    let kind = detect_backend(config)?;
    let backend = kind.name();
    let store = kind.open().await?;

    tracing::info!(%backend, "Task store ready");
    Ok(store)
}
