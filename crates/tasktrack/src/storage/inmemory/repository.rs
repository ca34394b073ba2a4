//! In-memory repository implementation.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use tasktrack_core::storage::{RepositoryError, Result, TaskRepository};
use tasktrack_core::task::{NewTask, Task, TaskId, TaskStatus};

/// In-memory storage backend.
///
/// Ids come from a counter that is never rewound, so deleted ids are not
/// handed out again.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    tasks: Arc<RwLock<BTreeMap<TaskId, Task>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn insert_task(&self, task: NewTask) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let task = task.into_task(id, Utc::now());
        tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().cloned().collect())
    }

    async fn list_tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|t| t.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|t| Reverse((t.created_at, t.id)));
        Ok(matching)
    }

    async fn search_tasks_by_title(&self, fragment: &str) -> Result<Vec<Task>> {
        let needle = fragment.to_lowercase();
        let tasks = self.tasks.read().await;
        Ok(tasks
            .values()
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn task_exists(&self, id: TaskId) -> Result<bool> {
        let tasks = self.tasks.read().await;
        Ok(tasks.contains_key(&id))
    }

    async fn update_task(&self, task: &Task) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.id) {
            Some(stored) => {
                *stored = task.clone();
                Ok(task.clone())
            }
            None => Err(RepositoryError::task_not_found(task.id)),
        }
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        if tasks.remove(&id).is_none() {
            return Err(RepositoryError::task_not_found(id));
        }
        Ok(())
    }

    async fn count_tasks(&self) -> Result<u64> {
        let tasks = self.tasks.read().await;
        Ok(tasks.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasktrack_core::task::{TaskInput, TaskPriority};

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = InMemoryRepository::new();

        let task = repo
            .insert_task(NewTask::new("Learn K8s").with_priority(TaskPriority::High))
            .await
            .unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(repo.get_task(task.id).await.unwrap(), Some(task));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_task(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_keep_increasing_after_delete() {
        let repo = InMemoryRepository::new();
        let first = repo.insert_task(NewTask::new("First")).await.unwrap();
        repo.delete_task(first.id).await.unwrap();

        let second = repo.insert_task(NewTask::new("Second")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_list_tasks_in_id_order() {
        let repo = InMemoryRepository::new();
        for title in ["One", "Two", "Three"] {
            repo.insert_task(NewTask::new(title)).await.unwrap();
        }

        let ids: Vec<TaskId> = repo
            .list_tasks()
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_list_by_status_newest_first() {
        let repo = InMemoryRepository::new();
        let a = repo.insert_task(NewTask::new("Alpha")).await.unwrap();
        let b = repo.insert_task(NewTask::new("Bravo")).await.unwrap();
        repo.insert_task(NewTask::new("Done").with_status(TaskStatus::Completed))
            .await
            .unwrap();

        let todo = repo.list_tasks_by_status(TaskStatus::Todo).await.unwrap();

        assert_eq!(
            todo.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![b.id, a.id]
        );
    }

    #[tokio::test]
    async fn test_search_ignores_case() {
        let repo = InMemoryRepository::new();
        repo.insert_task(NewTask::new("Learn Kubernetes")).await.unwrap();
        repo.insert_task(NewTask::new("Write report")).await.unwrap();

        let hits = repo.search_tasks_by_title("kUbE").await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Learn Kubernetes");
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryRepository::new();
        let mut task = repo.insert_task(NewTask::new("Original")).await.unwrap();

        TaskInput::new("Updated")
            .with_status(TaskStatus::Completed)
            .apply_to(&mut task);
        repo.update_task(&task).await.unwrap();

        let stored = repo.get_task(task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Updated");
        assert_eq!(stored.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let repo = InMemoryRepository::new();
        let ghost = NewTask::new("Ghost").into_task(9, Utc::now());

        let result = repo.update_task(&ghost).await;

        assert_eq!(result, Err(RepositoryError::task_not_found(9)));
        assert_eq!(repo.count_tasks().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let repo = InMemoryRepository::new();
        let task = repo.insert_task(NewTask::new("Doomed")).await.unwrap();
        assert!(repo.task_exists(task.id).await.unwrap());

        repo.delete_task(task.id).await.unwrap();

        assert!(!repo.task_exists(task.id).await.unwrap());
        assert!(matches!(
            repo.delete_task(task.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_count() {
        let repo = InMemoryRepository::new();
        repo.insert_task(NewTask::new("One")).await.unwrap();
        repo.insert_task(NewTask::new("Two")).await.unwrap();

        assert_eq!(repo.count_tasks().await.unwrap(), 2);
    }
}
