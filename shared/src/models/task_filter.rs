use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{task::Task, task_priority::TaskPriority};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<StatusFilter> {
        match value {
            "all" => Some(StatusFilter::All),
            "active" => Some(StatusFilter::Active),
            "completed" => Some(StatusFilter::Completed),
            _ => None,
        }
    }

    fn admits(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Default,
    DueDate,
    Priority,
    CreatedAt,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Default => "default",
            SortBy::DueDate => "dueDate",
            SortBy::Priority => "priority",
            SortBy::CreatedAt => "createdAt",
        }
    }

    pub fn parse(value: &str) -> Option<SortBy> {
        match value {
            "default" => Some(SortBy::Default),
            "dueDate" => Some(SortBy::DueDate),
            "priority" => Some(SortBy::Priority),
            "createdAt" => Some(SortBy::CreatedAt),
            _ => None,
        }
    }

    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let newest_first = || b.created_at.cmp(&a.created_at);
        let highest_first = || b.priority.cmp(&a.priority);

        match self {
            SortBy::Default => dated_first(a, b)
                .then_with(highest_first)
                .then_with(newest_first),
            SortBy::DueDate => dated_first(a, b).then_with(newest_first),
            SortBy::Priority => highest_first().then_with(newest_first),
            SortBy::CreatedAt => newest_first(),
        }
    }
}

/// Earliest due date first; tasks without one sink to the bottom.
fn dated_first(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// What the list endpoint was asked for. Also the client's view configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub priority: Option<TaskPriority>,
    pub search: Option<String>,
    pub sort_by: SortBy,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.admits(task) {
            return false;
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        match self.search_needle() {
            Some(needle) => task.mentions(&needle),
            None => true,
        }
    }

    /// Filters then orders. Never fails; an empty input gives an empty output.
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        let mut selected: Vec<Task> = tasks.into_iter().filter(|t| self.matches(t)).collect();
        selected.sort_by(|a, b| self.sort_by.compare(a, b));
        selected
    }

    /// Trimmed, lowercased search term, or `None` when there is nothing to search for.
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}
