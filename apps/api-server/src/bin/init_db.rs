//! Creates the local SQLite database and fills it with example tasks.
//!
//! Usage: `init-db [PATH]`. Without an argument the path comes from
//! `TASKS_DB_PATH`, falling back to `backend/tasks.db`.

use std::path::PathBuf;

use api_server::{config::Config, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or(config.store.sqlite_path);

    let count = task_store::seed_sqlite(&path).await?;
    println!("SQLite DB created at {} with {count} tasks.", path.display());

    Ok(())
}
