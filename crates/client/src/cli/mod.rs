//! CLI command definitions.

pub mod health;
pub mod tasks;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the tasktrack API.
#[derive(Debug, Parser)]
#[command(name = "tasktrack-client")]
#[command(about = "CLI client for the tasktrack API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "TASKTRACK_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Task management.
    Tasks(tasks::TasksCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasktrack_core::task::{TaskPriority, TaskStatus};

    use tasks::TasksAction;

    #[test]
    fn test_parse_create_command() {
        let cli = Cli::try_parse_from([
            "tasktrack-client",
            "tasks",
            "create",
            "--title",
            "Learn K8s",
            "--priority",
            "high",
            "--due-date",
            "2024-07-01T12:00",
        ])
        .unwrap();

        let Commands::Tasks(cmd) = cli.command else {
            panic!("expected tasks command");
        };
        let TasksAction::Create(fields) = cmd.action else {
            panic!("expected create action");
        };
        assert_eq!(fields.title, "Learn K8s");
        assert_eq!(fields.priority, Some(TaskPriority::High));
        assert!(fields.due_date.is_some());
        assert_eq!(cli.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_parse_by_status_is_lenient() {
        let cli =
            Cli::try_parse_from(["tasktrack-client", "tasks", "by-status", "in-progress"]).unwrap();

        let Commands::Tasks(cmd) = cli.command else {
            panic!("expected tasks command");
        };
        assert!(matches!(
            cmd.action,
            TasksAction::ByStatus {
                status: TaskStatus::InProgress
            }
        ));
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["tasktrack-client", "tasks", "by-status", "DONE"]).is_err());
    }

    #[test]
    fn test_rejects_bad_due_date() {
        let result = Cli::try_parse_from([
            "tasktrack-client",
            "tasks",
            "create",
            "--title",
            "Deadline",
            "--due-date",
            "next tuesday",
        ]);
        assert!(result.is_err());
    }
}
