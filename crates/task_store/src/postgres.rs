//! PostgreSQL task store implementation.

use std::time::Duration;

use async_trait::async_trait;
use entities::{Task, TaskId, TaskUpdate};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection, PgConnection, Pool, Postgres, QueryBuilder,
};

use crate::{row::TaskRow, TaskStore, TaskStoreError, TaskStoreResult};

/// Upper bound on establishing the startup connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Schema of the networked database. Safe to run on every startup.
pub const POSTGRES_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    done BOOLEAN NOT NULL DEFAULT FALSE
)
"#;

/// Task store backed by an external PostgreSQL service.
///
/// Holds a single connection for the lifetime of the process. Writes return
/// the affected row directly instead of reading it back.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: Pool<Postgres>,
}

impl PostgresTaskStore {
    /// Connects to `database_url` and creates the tasks table if missing.
    ///
    /// Fails if the server cannot be reached.
    pub async fn connect(database_url: &str) -> TaskStoreResult<Self> {
        let options: PgConnectOptions = database_url.parse()?;

        // Surfaces the real connection error instead of a pool timeout.
        let conn = tokio::time::timeout(CONNECT_TIMEOUT, PgConnection::connect_with(&options))
            .await
            .map_err(|_| TaskStoreError::ConnectTimeout(CONNECT_TIMEOUT))??;
        conn.close().await?;

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(CONNECT_TIMEOUT)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.init().await?;

        tracing::debug!("PostgreSQL task store connected");
        Ok(store)
    }

    /// Wraps an existing pool. Call [`PostgresTaskStore::init`] before use.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Creates the tasks table if it is missing.
    pub async fn init(&self) -> TaskStoreResult<()> {
        sqlx::query(POSTGRES_SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let rows: Vec<TaskRow> =
            sqlx::query_as("SELECT id::BIGINT AS id, title, done FROM tasks ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn get_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let row: Option<TaskRow> =
            sqlx::query_as("SELECT id::BIGINT AS id, title, done FROM tasks WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Task::from))
    }

    async fn create_task(&self, title: &str) -> TaskStoreResult<Task> {
        let row: TaskRow = sqlx::query_as(
            "INSERT INTO tasks (title, done) VALUES ($1, FALSE) \
             RETURNING id::BIGINT AS id, title, done",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_task(&self, id: TaskId, update: TaskUpdate) -> TaskStoreResult<Option<Task>> {
        if update.is_empty() {
            return self.get_task(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE tasks SET ");
        let mut assignments = builder.separated(", ");
        if let Some(title) = update.title {
            assignments.push("title = ").push_bind_unseparated(title);
        }
        if let Some(done) = update.done {
            assignments.push("done = ").push_bind_unseparated(done);
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING id::BIGINT AS id, title, done");

        let row: Option<TaskRow> = builder
            .build_query_as::<TaskRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Task::from))
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
