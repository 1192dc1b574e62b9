// Requests
pub mod create_task_request;
pub mod update_task_request;
pub mod bulk_action_request;
pub mod task_query;


// Responses
pub mod delete_task_response;
pub mod bulk_action_response;
pub mod error_response;
