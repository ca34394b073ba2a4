use async_trait::async_trait;

use crate::task::{NewTask, Task, TaskId, TaskStatus};

use super::Result;

/// Durable record-keeper for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task, assigning its id and both timestamps.
    async fn insert_task(&self, task: NewTask) -> Result<Task>;

    /// Gets a task by its ID.
    async fn get_task(&self, id: TaskId) -> Result<Option<Task>>;

    /// Gets every task, ordered by id ascending.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Gets every task with the given status, newest first (ties by id descending).
    async fn list_tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>>;

    /// Gets every task whose title contains `fragment`, ignoring case.
    async fn search_tasks_by_title(&self, fragment: &str) -> Result<Vec<Task>>;

    /// Returns whether a task with this ID exists.
    async fn task_exists(&self, id: TaskId) -> Result<bool>;

    /// Overwrites an existing task. Fails with `NotFound` if it is gone.
    async fn update_task(&self, task: &Task) -> Result<Task>;

    /// Deletes a task by its ID. Fails with `NotFound` if it is gone.
    async fn delete_task(&self, id: TaskId) -> Result<()>;

    /// Returns the number of stored tasks.
    async fn count_tasks(&self) -> Result<u64>;
}
