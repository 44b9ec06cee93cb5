//! In-memory task store implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use entities::{Task, TaskId, TaskUpdate};
use tokio::sync::RwLock;

use crate::{TaskStore, TaskStoreResult};

#[derive(Debug)]
struct MemoryState {
    tasks: HashMap<TaskId, Task>,
    /// Id handed to the next created task. Never decremented.
    next_id: TaskId,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory task store.
///
/// Contents live only as long as the process. The id counter and the task map
/// share one lock, so id assignment and insertion happen together.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    state: RwLock<MemoryState>,
}

impl MemoryTaskStore {
    /// Creates a new, empty in-memory task store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().await;
        let mut result: Vec<Task> = state.tasks.values().cloned().collect();
        result.sort_by_key(|t| t.id);
        Ok(result)
    }

    async fn get_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn create_task(&self, title: &str) -> TaskStoreResult<Task> {
        let mut state = self.state.write().await;
        let task = Task::new(state.next_id, title);
        state.next_id += 1;
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, update: TaskUpdate) -> TaskStoreResult<Option<Task>> {
        let mut state = self.state.write().await;
        Ok(state.tasks.get_mut(&id).map(|task| {
            update.apply_to(task);
            task.clone()
        }))
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.tasks.remove(&id).is_some())
    }
}
