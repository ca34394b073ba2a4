//! Task API operations.

use super::TasktrackClient;
use crate::error::Result;
use tasktrack_core::task::{Task, TaskId, TaskInput, TaskStatus};

impl TasktrackClient {
    /// List all tasks.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let response = self.client.get(self.url("/v1/tasks")).send().await?;
        self.handle_response(response).await
    }

    /// Get task by ID.
    pub async fn get_task(&self, id: TaskId) -> Result<Task> {
        let response = self
            .client
            .get(self.url(&format!("/v1/tasks/{}", id)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// List tasks with the given status, newest first.
    pub async fn list_tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let response = self
            .client
            .get(self.url(&format!("/v1/tasks/status/{}", status)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Search tasks by title fragment.
    pub async fn search_tasks(&self, title: &str) -> Result<Vec<Task>> {
        let response = self
            .client
            .get(self.url("/v1/tasks/search"))
            .query(&[("title", title)])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Count tasks.
    pub async fn count_tasks(&self) -> Result<u64> {
        let response = self.client.get(self.url("/v1/tasks/count")).send().await?;
        self.handle_response(response).await
    }

    /// Create a new task.
    pub async fn create_task(&self, input: &TaskInput) -> Result<Task> {
        let response = self
            .client
            .post(self.url("/v1/tasks"))
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Replace every client-settable field of a task.
    pub async fn update_task(&self, id: TaskId, input: &TaskInput) -> Result<Task> {
        let response = self
            .client
            .put(self.url(&format!("/v1/tasks/{}", id)))
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete task by ID.
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/v1/tasks/{}", id)))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
