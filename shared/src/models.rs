pub mod bulk_action;
pub mod due_date;
pub mod task;
pub mod task_filter;
pub mod task_priority;
pub mod validation_error;
