use serde::{Deserialize, Serialize};

use crate::{
    task_filter::{SortBy, StatusFilter, TaskFilter},
    task_priority::TaskPriority,
};

/// Raw `GET /tasks` query string. Every value is optional and anything
/// unrecognized is ignored, so listing never fails on bad parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

impl From<TaskQuery> for TaskFilter {
    fn from(query: TaskQuery) -> Self {
        TaskFilter {
            status: query.status.as_deref().and_then(StatusFilter::parse).unwrap_or_default(),
            priority: query.priority.as_deref().and_then(TaskPriority::parse),
            search: query.search.filter(|s| !s.trim().is_empty()),
            sort_by: query.sort_by.as_deref().and_then(SortBy::parse).unwrap_or_default(),
        }
    }
}
