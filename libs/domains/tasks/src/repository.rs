use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{Task, TaskFilter, TaskInput};

/// Repository trait for Task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task; the id is assigned by the store
    async fn create(&self, input: TaskInput) -> TaskResult<Task>;

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Tasks matching every set field of `filter`, ascending id
    async fn list(&self, filter: TaskFilter) -> TaskResult<Vec<Task>>;

    /// Replace the mutable fields of an existing task.
    ///
    /// Returns `TaskError::NotFound` if no row has `id`.
    async fn update(&self, id: i32, input: TaskInput) -> TaskResult<Task>;

    /// Delete a task by ID. `false` if nothing was deleted.
    async fn delete(&self, id: i32) -> TaskResult<bool>;
}
