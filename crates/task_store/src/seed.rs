//! Bootstrapping of the SQLite data file for local development.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};

use crate::{SqliteTaskStore, TaskStoreResult};

/// Example tasks written by [`seed_sqlite`], as `(title, done)`.
pub const SEED_TASKS: &[(&str, bool)] = &[
    ("Learn axum", false),
    ("Build a mini project", false),
    ("Deploy the API", true),
];

/// Creates (or resets) the SQLite data file at `path` with the example tasks.
///
/// Existing rows are removed first. The file is switched to WAL journaling.
/// Returns the number of tasks inserted.
pub async fn seed_sqlite(path: &Path) -> TaskStoreResult<u64> {
    let options = SqliteConnectOptions::new().journal_mode(SqliteJournalMode::Wal);
    let store = SqliteTaskStore::open_with(path, options).await?;

    let mut tx = store.pool().begin().await?;
    sqlx::query("DELETE FROM tasks").execute(&mut *tx).await?;

    let mut inserted = 0;
    for (title, done) in SEED_TASKS {
        let result = sqlx::query("INSERT INTO tasks (title, done) VALUES (?, ?)")
            .bind(*title)
            .bind(*done)
            .execute(&mut *tx)
            .await?;
        inserted += result.rows_affected();
    }
    tx.commit().await?;

    store.pool().close().await;

    tracing::info!(path = %path.display(), count = inserted, "SQLite database seeded");
    Ok(inserted)
}
