use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{task::TaskChanges, task_priority::TaskPriority, validation_error::ValidationError};

/// Body of `PUT /tasks/{id}`. Omitted fields stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "crate::due_date::deserialize_patch")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<TaskChanges, ValidationError> {
        let title = match self.title.as_deref().map(str::trim) {
            Some("") => return Err(ValidationError::new("Title cannot be empty")),
            other => other.map(str::to_string),
        };

        Ok(TaskChanges {
            title,
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
            tags: self.tags.clone(),
            completed: self.completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> UpdateTaskRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn absent_and_null_due_date_differ() {
        assert_eq!(parse(json!({})).due_date, None);
        assert_eq!(parse(json!({ "dueDate": null })).due_date, Some(None));
        assert!(parse(json!({ "dueDate": "2025-04-01" })).due_date.unwrap().is_some());
    }

    #[test]
    fn explicit_empty_title_is_rejected() {
        let err = parse(json!({ "title": "  " })).validate().unwrap_err();
        assert_eq!(err.message, "Title cannot be empty");
    }

    #[test]
    fn title_is_trimmed_when_supplied() {
        let changes = parse(json!({ "title": " New name " })).validate().unwrap();
        assert_eq!(changes.title.as_deref(), Some("New name"));
    }

    #[test]
    fn only_priority() {
        let changes = parse(json!({ "priority": "low" })).validate().unwrap();
        assert_eq!(
            changes,
            TaskChanges { priority: Some(TaskPriority::Low), ..Default::default() }
        );
    }

    #[test]
    fn invalid_values_fail_to_deserialize() {
        assert!(serde_json::from_value::<UpdateTaskRequest>(json!({ "priority": "urgent" })).is_err());
        assert!(serde_json::from_value::<UpdateTaskRequest>(json!({ "dueDate": "soon" })).is_err());
    }

    #[test]
    fn clearing_due_date_serializes_as_null() {
        let request = UpdateTaskRequest { due_date: Some(None), ..Default::default() };
        assert_eq!(serde_json::to_value(request).unwrap(), json!({ "dueDate": null }));
    }
}
