//! SQLite task store implementation.

use std::path::Path;

use async_trait::async_trait;
use entities::{Task, TaskId, TaskUpdate};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, QueryBuilder, Sqlite,
};

use crate::{row::TaskRow, TaskStore, TaskStoreError, TaskStoreResult};

/// Schema of the embedded database. Safe to run on every startup.
pub const SQLITE_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    done INTEGER NOT NULL DEFAULT 0
)
"#;

/// Task store backed by a single local SQLite file.
///
/// `AUTOINCREMENT` keeps ids from being reused after deletes. Every statement
/// runs on its own and commits before the call returns.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    pool: Pool<Sqlite>,
}

impl SqliteTaskStore {
    /// Opens the database file at `path`, creating it and its parent directory
    /// if they do not exist yet.
    pub async fn open(path: &Path) -> TaskStoreResult<Self> {
        Self::open_with(path, SqliteConnectOptions::new()).await
    }

    /// Opens the database file at `path` with extra connection options.
    pub async fn open_with(path: &Path, options: SqliteConnectOptions) -> TaskStoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = options.filename(path).create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.init().await?;

        tracing::debug!(path = %path.display(), "SQLite task store opened");
        Ok(store)
    }

    /// Wraps an existing pool. Call [`SqliteTaskStore::init`] before use.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Creates the tasks table if it is missing.
    pub async fn init(&self) -> TaskStoreResult<()> {
        sqlx::query(SQLITE_SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let rows: Vec<TaskRow> =
            sqlx::query_as("SELECT id, title, done FROM tasks ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn get_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as("SELECT id, title, done FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Task::from))
    }

    async fn create_task(&self, title: &str) -> TaskStoreResult<Task> {
        let result = sqlx::query("INSERT INTO tasks (title, done) VALUES (?, 0)")
            .bind(title)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_task(id)
            .await?
            .ok_or_else(|| TaskStoreError::not_found("Task", id))
    }

    async fn update_task(&self, id: TaskId, update: TaskUpdate) -> TaskStoreResult<Option<Task>> {
        if update.is_empty() {
            return self.get_task(id).await;
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE tasks SET ");
        let mut assignments = builder.separated(", ");
        if let Some(title) = update.title {
            assignments.push("title = ").push_bind_unseparated(title);
        }
        if let Some(done) = update.done {
            assignments.push("done = ").push_bind_unseparated(done);
        }
        builder.push(" WHERE id = ").push_bind(id);
        builder.build().execute(&self.pool).await?;

        self.get_task(id).await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
