//! Task CLI commands.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use tasktrack_core::task::{TaskId, TaskInput, TaskPriority, TaskStatus};

/// Task management commands.
#[derive(Debug, Parser)]
pub struct TasksCommand {
    #[command(subcommand)]
    pub action: TasksAction,
}

/// Available task actions.
#[derive(Debug, Subcommand)]
pub enum TasksAction {
    /// List all tasks.
    List,
    /// Get task by ID.
    Get {
        /// Task ID.
        id: TaskId,
    },
    /// List tasks with a given status, newest first.
    ByStatus {
        /// Status (TODO, IN_PROGRESS, COMPLETED, CANCELLED).
        status: TaskStatus,
    },
    /// Search tasks by title (case-insensitive substring).
    Search {
        /// Title fragment.
        title: String,
    },
    /// Count tasks.
    Count,
    /// Create a new task.
    Create(TaskFields),
    /// Replace every field of a task. Omitted flags reset to their defaults.
    Update {
        /// Task ID.
        id: TaskId,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete task by ID.
    Delete {
        /// Task ID.
        id: TaskId,
    },
}

/// Client-settable task fields.
#[derive(Debug, Clone, Args)]
pub struct TaskFields {
    /// Task title (3-200 characters).
    #[arg(long)]
    pub title: String,
    /// Task description.
    #[arg(long)]
    pub description: Option<String>,
    /// Status (default: TODO).
    #[arg(long)]
    pub status: Option<TaskStatus>,
    /// Priority (default: MEDIUM).
    #[arg(long)]
    pub priority: Option<TaskPriority>,
    /// Due date (RFC 3339, or YYYY-MM-DDTHH:MM[:SS] in UTC).
    #[arg(long, value_parser = parse_due_date)]
    pub due_date: Option<DateTime<Utc>>,
}

fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, String> {
    tasktrack_core::serde::parse_datetime(raw).map_err(|e| format!("invalid date '{raw}': {e}"))
}

impl From<TaskFields> for TaskInput {
    fn from(fields: TaskFields) -> Self {
        TaskInput {
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
            due_date: fields.due_date,
        }
    }
}
