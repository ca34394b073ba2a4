//! Client-facing request payload for creating and updating tasks.
//!
//! Shared by the server (deserialization, validation, mapping) and the client
//! (serialization). Pure data and pure functions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{NewTask, Task, TaskPriority, TaskStatus};
use super::{validate_task_input, ValidationError};
use crate::serde::{deserialize_optional_datetime, deserialize_optional_string};

/// The client-settable fields of a task.
///
/// Used for both `POST /v1/tasks` and `PUT /v1/tasks/{id}`. An update is a
/// full overwrite: omitted optional fields become absent and omitted
/// `status`/`priority` fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskInput {
    /// Create a new payload with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Checks title and description constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_task_input(self)
    }

    /// Convert into a storable task, applying the status and priority defaults.
    pub fn into_new_task(self) -> NewTask {
        NewTask {
            title: self.title,
            description: self.description,
            status: self.status.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            due_date: self.due_date,
        }
    }

    /// Overwrite every client-settable field of `task` and refresh its
    /// `updated_at`. `id` and `created_at` are left untouched.
    pub fn apply_to(self, task: &mut Task) {
        task.title = self.title;
        task.description = self.description;
        task.status = self.status.unwrap_or_default();
        task.priority = self.priority.unwrap_or_default();
        task.due_date = self.due_date;
        task.touch();
    }
}

impl From<&Task> for TaskInput {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: Some(task.status),
            priority: Some(task.priority),
            due_date: task.due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let input: TaskInput = serde_json::from_str(r#"{"title":"Learn K8s"}"#).unwrap();
        assert_eq!(input, TaskInput::new("Learn K8s"));
    }

    #[test]
    fn test_deserialize_full_payload() {
        let json = r#"{
            "title": "Learn K8s",
            "description": "Pods first",
            "status": "IN_PROGRESS",
            "priority": "HIGH",
            "dueDate": "2024-07-01T12:00:00"
        }"#;
        let input: TaskInput = serde_json::from_str(json).unwrap();

        assert_eq!(input.description.as_deref(), Some("Pods first"));
        assert_eq!(input.status, Some(TaskStatus::InProgress));
        assert_eq!(input.priority, Some(TaskPriority::High));
        assert_eq!(
            input.due_date,
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_blank_optional_fields_are_absent() {
        let json = r#"{"title":"Learn K8s","description":"  ","dueDate":""}"#;
        let input: TaskInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.description, None);
        assert_eq!(input.due_date, None);
    }

    #[test]
    fn test_missing_title_deserializes_as_blank() {
        let input: TaskInput = serde_json::from_str(r#"{"priority":"LOW"}"#).unwrap();
        assert_eq!(input.validate(), Err(ValidationError::TitleBlank));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<TaskInput, _> =
            serde_json::from_str(r#"{"title":"Learn K8s","status":"DONE"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_into_new_task_applies_defaults() {
        let new_task = TaskInput::new("Learn K8s").into_new_task();
        assert_eq!(new_task.status, TaskStatus::Todo);
        assert_eq!(new_task.priority, TaskPriority::Medium);
        assert_eq!(new_task.description, None);
    }

    #[test]
    fn test_into_new_task_keeps_explicit_values() {
        let new_task = TaskInput::new("Learn K8s")
            .with_status(TaskStatus::Completed)
            .with_priority(TaskPriority::Critical)
            .into_new_task();
        assert_eq!(new_task.status, TaskStatus::Completed);
        assert_eq!(new_task.priority, TaskPriority::Critical);
    }

    #[test]
    fn test_apply_to_is_full_overwrite() {
        let mut task = NewTask::new("Original")
            .with_description("Old description")
            .with_status(TaskStatus::InProgress)
            .with_priority(TaskPriority::High)
            .with_due_date(fixed_timestamp())
            .into_task(4, fixed_timestamp());

        TaskInput::new("Replaced").apply_to(&mut task);

        assert_eq!(task.id, 4);
        assert_eq!(task.title, "Replaced");
        assert_eq!(task.description, None);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.due_date, None);
        assert_eq!(task.created_at, fixed_timestamp());
        assert!(task.updated_at > task.created_at);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let json = serde_json::to_value(TaskInput::new("Learn K8s").with_priority(TaskPriority::Low))
            .unwrap();
        assert_eq!(json, serde_json::json!({"title": "Learn K8s", "priority": "LOW"}));
    }

    #[test]
    fn test_from_task_preserves_fields() {
        let task = NewTask::new("Copy me")
            .with_status(TaskStatus::Cancelled)
            .into_task(1, fixed_timestamp());
        let input = TaskInput::from(&task);
        assert_eq!(input.title, "Copy me");
        assert_eq!(input.status, Some(TaskStatus::Cancelled));
        assert_eq!(input.priority, Some(TaskPriority::Medium));
    }
}
