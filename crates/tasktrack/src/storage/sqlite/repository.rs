//! SQLite repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;

use tasktrack_core::storage::{RepositoryError, Result, TaskRepository};
use tasktrack_core::task::{NewTask, Task, TaskId, TaskStatus};

use super::conversions::{escape_like, format_datetime, row_to_task};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Collects every row of a prepared statement into tasks.
fn query_tasks<P: rusqlite::Params>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
) -> std::result::Result<Vec<Task>, tokio_rusqlite::Error> {
    let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
    let rows = stmt.query_map(params, row_to_task).map_err(wrap_err)?;

    let mut tasks = Vec::new();
    for row_result in rows {
        tasks.push(row_result.map_err(wrap_err)?);
    }
    Ok(tasks)
}

/// SQLite-based task repository.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and ensures the schema exists.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub async fn new(path: &str) -> Result<Self> {
        if path == ":memory:" {
            return Self::new_in_memory().await;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    ///
    /// Data is lost when the repository is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn insert_task(&self, task: NewTask) -> Result<Task> {
        let now = Utc::now();
        let stamp = format_datetime(&now);
        let due_date = task.due_date.as_ref().map(format_datetime);
        let title = task.title.clone();
        let description = task.description.clone();
        let status = task.status.as_str();
        let priority = task.priority.as_str();

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TASK,
                    rusqlite::params![
                        title,
                        description,
                        status,
                        priority,
                        stamp,
                        stamp,
                        due_date
                    ],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        tracing::debug!(task_id = id, "Task inserted");
        Ok(task.into_task(id, now))
    }

    async fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_TASK_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_task) {
                    Ok(task) => Ok(Some(task)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Task", id.to_string()))
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.conn
            .call(|conn| query_tasks(conn, schema::SELECT_ALL_TASKS, []))
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn list_tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        self.conn
            .call(move |conn| query_tasks(conn, schema::SELECT_TASKS_BY_STATUS, [status.as_str()]))
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn search_tasks_by_title(&self, fragment: &str) -> Result<Vec<Task>> {
        let pattern = escape_like(fragment);

        self.conn
            .call(move |conn| query_tasks(conn, schema::SEARCH_TASKS_BY_TITLE, [pattern]))
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn task_exists(&self, id: TaskId) -> Result<bool> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::TASK_EXISTS, [id], |row| row.get::<_, bool>(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Task", id.to_string()))
    }

    async fn update_task(&self, task: &Task) -> Result<Task> {
        let id = task.id;
        let title = task.title.clone();
        let description = task.description.clone();
        let status = task.status.as_str();
        let priority = task.priority.as_str();
        let updated_at = format_datetime(&task.updated_at);
        let due_date = task.due_date.as_ref().map(format_datetime);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_TASK,
                        rusqlite::params![
                            id,
                            title,
                            description,
                            status,
                            priority,
                            updated_at,
                            due_date
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Task", id.to_string()))?;

        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_TASK, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Task", id.to_string()))
    }

    async fn count_tasks(&self) -> Result<u64> {
        let count = self
            .conn
            .call(|conn| {
                conn.query_row(schema::COUNT_TASKS, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(count.max(0) as u64)
    }
}
