//! Pretty output formatting.

use tasktrack_core::api::{HealthInfo, ReadinessReport};
use tasktrack_core::task::Task;

/// Format a task for display.
pub fn format_task(task: &Task) -> String {
    let mut output = format!(
        "#{} {} [{} / {}]\n  Created: {}\n  Updated: {}",
        task.id,
        task.title,
        task.status,
        task.priority,
        task.created_at.to_rfc3339(),
        task.updated_at.to_rfc3339()
    );
    if let Some(desc) = &task.description {
        output.push_str(&format!("\n  Description: {}", desc));
    }
    if let Some(due) = &task.due_date {
        output.push_str(&format!("\n  Due: {}", due.to_rfc3339()));
    }
    output
}

/// Format tasks for display.
pub fn format_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }
    let mut output = format!("TASKS ({})\n", tasks.len());
    output.push_str(&"-".repeat(40));
    for task in tasks {
        output.push_str(&format!("\n{}", format_task(task)));
        output.push('\n');
    }
    output
}

/// Format the application status for display.
pub fn format_health(health: &HealthInfo) -> String {
    format!(
        "{} {} ({})\n  Status: {}",
        health.application, health.version, health.environment, health.status
    )
}

/// Format a readiness report for display.
pub fn format_readiness(report: &ReadinessReport) -> String {
    format!(
        "Readiness: {}\n  Store: {}\n  Cache: {}",
        report.status, report.store, report.cache
    )
}
