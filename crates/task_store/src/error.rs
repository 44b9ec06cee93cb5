//! Task store error types.

use thiserror::Error;

use crate::SelectError;

/// Errors that can occur during task store operations.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Entity vanished between a write and the read that follows it.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error while preparing a database file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The database server did not answer in time.
    #[error("Timed out after {0:?} connecting to the database")]
    ConnectTimeout(std::time::Duration),

    /// No backend could be chosen for the given configuration.
    #[error("Backend selection failed: {0}")]
    Selection(#[from] SelectError),
}

impl TaskStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;
