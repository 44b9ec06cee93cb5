//! Task store trait definitions.

use async_trait::async_trait;
use entities::{Task, TaskId, TaskUpdate};

use crate::TaskStoreResult;

/// Trait for task storage operations.
///
/// Every backend assigns ids itself and never hands out the same id twice.
/// Callers are expected to pass already validated titles.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Lists all tasks in ascending id order.
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>>;

    /// Gets a task by ID.
    async fn get_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Creates a new task that is not done and returns the stored record.
    async fn create_task(&self, title: &str) -> TaskStoreResult<Task>;

    /// Overwrites the fields present in `update`.
    ///
    /// Returns the task as stored afterwards, or `None` if no task has the
    /// given id. An empty update only reads the task.
    async fn update_task(&self, id: TaskId, update: TaskUpdate) -> TaskStoreResult<Option<Task>>;

    /// Deletes a task. Returns true if a task was removed.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<bool>;
}
