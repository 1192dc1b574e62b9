use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task_priority::TaskPriority;

/// A persisted work item. `tags` is always a sequence and `completed` always a
/// boolean on the wire, whatever the store does internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub tags: Vec<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated creation input. Built by `CreateTaskRequest::validate`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub tags: Vec<String>,
}

/// Validated partial update. `None` leaves the field untouched;
/// `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub priority: Option<TaskPriority>,
    pub tags: Option<Vec<String>>,
    pub completed: Option<bool>,
}

impl Task {
    pub fn new(new_task: NewTask, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), new_task, now)
    }

    pub fn with_id(id: Uuid, new_task: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            due_date: new_task.due_date,
            priority: new_task.priority,
            tags: new_task.tags,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &TaskChanges, now: DateTime<Utc>) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(tags) = &changes.tags {
            self.tags = tags.clone();
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.touch(now);
    }

    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.touch(now);
    }

    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.completed = completed;
        self.touch(now);
    }

    /// Rewrites `updated_at`. Never moves backwards or stands still, even when
    /// two mutations land within the clock's resolution.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    /// Case-insensitive substring match against title or description.
    pub fn mentions(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self.description.to_lowercase().contains(needle_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(now: DateTime<Utc>) -> Task {
        Task::new(
            NewTask {
                title: "Water plants".into(),
                description: "Balcony first".into(),
                due_date: None,
                priority: TaskPriority::Medium,
                tags: vec!["home".into(), "weekly".into()],
            },
            now,
        )
    }

    #[test]
    fn new_task_starts_incomplete_with_matching_timestamps() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        let task = sample(now);
        assert!(!task.completed);
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
    }

    #[test]
    fn partial_apply_leaves_other_fields_alone() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        let mut task = sample(now);
        let before = task.clone();

        let later = now + Duration::minutes(5);
        task.apply(&TaskChanges { priority: Some(TaskPriority::Low), ..Default::default() }, later);

        assert_eq!(task.priority, TaskPriority::Low);
        assert_eq!(task.title, before.title);
        assert_eq!(task.description, before.description);
        assert_eq!(task.tags, before.tags);
        assert_eq!(task.due_date, before.due_date);
        assert_eq!(task.created_at, before.created_at);
        assert_eq!(task.updated_at, later);
    }

    #[test]
    fn clearing_due_date_is_distinct_from_leaving_it() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        let mut task = sample(now);
        task.due_date = Some(now);

        task.apply(&TaskChanges::default(), now);
        assert_eq!(task.due_date, Some(now));

        task.apply(&TaskChanges { due_date: Some(None), ..Default::default() }, now);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn touch_is_strictly_increasing_under_a_frozen_clock() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        let mut task = sample(now);

        task.toggle(now);
        let first = task.updated_at;
        task.toggle(now);

        assert!(first > now);
        assert!(task.updated_at > first);
        assert!(!task.completed);
    }

    #[test]
    fn serializes_with_camel_case_and_null_due_date() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        let json = serde_json::to_value(sample(now)).unwrap();
        assert!(json["dueDate"].is_null());
        assert_eq!(json["completed"], serde_json::json!(false));
        assert_eq!(json["tags"], serde_json::json!(["home", "weekly"]));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
