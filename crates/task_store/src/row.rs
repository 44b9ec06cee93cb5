use entities::Task;
use sqlx::FromRow;

/// Database row for Task, shared by the SQL backends.
#[derive(Debug, FromRow)]
pub(crate) struct TaskRow {
    pub id: i64,
    pub title: String,
    pub done: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            done: row.done,
        }
    }
}
