//! Display helpers for due dates and timestamps. All take "now" explicitly.

use chrono::{DateTime, NaiveDate, Utc};
use taskboard_shared::task::Task;

const CALENDAR_FORMAT: &str = "%b %-d, %Y";

pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < now)
}

/// `Today`, `Tomorrow`, `Yesterday`, or a calendar date like `Mar 5, 2025`.
pub fn due_label(due: DateTime<Utc>, today: NaiveDate) -> String {
    let day = due.date_naive();
    match (day - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => day.format(CALENDAR_FORMAT).to_string(),
    }
}

/// Past instants read as `5m ago`, `3h ago`, `2d ago`, or a calendar date after
/// a week. Less than a minute either way is `just now`; anything further in the
/// future gets its calendar date.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes <= -1 {
        then.format(CALENDAR_FORMAT).to_string()
    } else if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        format!("{minutes}m ago")
    } else if days < 1 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        then.format(CALENDAR_FORMAT).to_string()
    }
}

/// `YYYY-MM-DD`, the value a date input expects.
pub fn date_input_value(due: DateTime<Utc>) -> String {
    due.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use taskboard_shared::{task::NewTask, task_priority::TaskPriority};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn task_due(due: Option<DateTime<Utc>>) -> Task {
        Task::new(
            NewTask {
                title: "t".into(),
                description: String::new(),
                due_date: due,
                priority: TaskPriority::Medium,
                tags: Vec::new(),
            },
            at(2025, 1, 1, 0),
        )
    }

    #[test]
    fn overdue_only_when_past_and_open() {
        let now = at(2025, 3, 5, 12);
        let mut task = task_due(Some(now - Duration::hours(1)));
        assert!(is_overdue(&task, now));

        task.completed = true;
        assert!(!is_overdue(&task, now));

        assert!(!is_overdue(&task_due(Some(now + Duration::hours(1))), now));
        assert!(!is_overdue(&task_due(None), now));
    }

    #[test]
    fn due_labels() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(due_label(at(2025, 3, 5, 23), today), "Today");
        assert_eq!(due_label(at(2025, 3, 6, 0), today), "Tomorrow");
        assert_eq!(due_label(at(2025, 3, 4, 8), today), "Yesterday");
        assert_eq!(due_label(at(2025, 3, 15, 8), today), "Mar 15, 2025");
    }

    #[test]
    fn relative_times() {
        let now = at(2025, 3, 5, 12);
        assert_eq!(relative_time(now - Duration::seconds(20), now), "just now");
        assert_eq!(relative_time(now + Duration::seconds(20), now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2d ago");
        assert_eq!(relative_time(at(2025, 2, 1, 9), now), "Feb 1, 2025");
    }

    #[test]
    fn future_instants_show_their_date() {
        let now = at(2025, 3, 5, 12);
        assert_eq!(relative_time(now + Duration::seconds(59), now), "just now");
        assert_eq!(relative_time(now + Duration::minutes(5), now), "Mar 5, 2025");
        assert_eq!(relative_time(now + Duration::days(7), now), "Mar 12, 2025");
    }

    #[test]
    fn input_value_is_iso_date() {
        assert_eq!(date_input_value(at(2025, 3, 5, 23)), "2025-03-05");
    }
}
