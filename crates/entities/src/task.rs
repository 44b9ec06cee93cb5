//! Task entity definitions.

use serde::{Deserialize, Serialize};

/// Identifier assigned to a task by the store that created it.
pub type TaskId = i64;

/// A tracked task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, never reused.
    pub id: TaskId,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Whether the task has been completed.
    pub done: bool,
}

impl Task {
    /// Creates a task that has not been completed yet.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }
}

/// Fields to overwrite on an existing task.
///
/// Absent fields keep their stored value. An update with no fields set is a
/// plain read of the current state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// New title.
    pub title: Option<String>,
    /// New completion flag.
    pub done: Option<bool>,
}

impl TaskUpdate {
    /// Creates an update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title to overwrite.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the completion flag to overwrite.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    /// Returns true if no field would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.done.is_none()
    }

    /// Applies the present fields to `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(done) = self.done {
            task.done = done;
        }
    }
}
