//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create the schema.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL,
    priority TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    due_date TEXT
);

CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at);
CREATE INDEX IF NOT EXISTS idx_tasks_status_created_at ON tasks(status, created_at);
"#;

pub const INSERT_TASK: &str = r#"
INSERT INTO tasks (title, description, status, priority, created_at, updated_at, due_date)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_TASK_BY_ID: &str = r#"
SELECT id, title, description, status, priority, created_at, updated_at, due_date
FROM tasks
WHERE id = ?1
"#;

pub const SELECT_ALL_TASKS: &str = r#"
SELECT id, title, description, status, priority, created_at, updated_at, due_date
FROM tasks
ORDER BY id ASC
"#;

pub const SELECT_TASKS_BY_STATUS: &str = r#"
SELECT id, title, description, status, priority, created_at, updated_at, due_date
FROM tasks
WHERE status = ?1
ORDER BY created_at DESC, id DESC
"#;

/// `?1` must already be escaped with [`super::conversions::escape_like`].
pub const SEARCH_TASKS_BY_TITLE: &str = r#"
SELECT id, title, description, status, priority, created_at, updated_at, due_date
FROM tasks
WHERE lower(title) LIKE '%' || lower(?1) || '%' ESCAPE '\'
ORDER BY id ASC
"#;

pub const TASK_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)
"#;

pub const UPDATE_TASK: &str = r#"
UPDATE tasks
SET title = ?2, description = ?3, status = ?4, priority = ?5, updated_at = ?6, due_date = ?7
WHERE id = ?1
"#;

pub const DELETE_TASK: &str = r#"
DELETE FROM tasks
WHERE id = ?1
"#;

pub const COUNT_TASKS: &str = r#"
SELECT COUNT(*) FROM tasks
"#;
