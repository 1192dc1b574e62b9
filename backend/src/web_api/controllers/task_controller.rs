use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use taskboard_shared::{
    bulk_action::BulkAction, bulk_action_request::BulkActionRequest,
    bulk_action_response::BulkActionResponse, create_task_request::CreateTaskRequest,
    delete_task_response::DeleteTaskResponse, task::Task, task_filter::TaskFilter,
    task_query::TaskQuery, update_task_request::UpdateTaskRequest,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{api_error::ApiError, app_state::SharedState};

pub struct TaskController {}

/// Ids are opaque to callers: anything that is not a UUID cannot exist.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::task_not_found())
}

impl TaskController {
    // GET /tasks
    pub async fn list(
        State(state): State<SharedState>,
        query: Result<Query<TaskQuery>, QueryRejection>,
    ) -> Result<Json<Vec<Task>>, ApiError> {
        let filter: TaskFilter = query.map(|Query(q)| q).unwrap_or_default().into();
        let tasks = filter.apply(state.repository.list_tasks()?);
        debug!(?filter, count = tasks.len(), "listed tasks");
        Ok(Json(tasks))
    }

    // GET /tasks/:id
    pub async fn get(
        State(state): State<SharedState>,
        Path(id): Path<String>,
    ) -> Result<Json<Task>, ApiError> {
        let id = parse_id(&id)?;
        state
            .repository
            .get_task(id)?
            .map(Json)
            .ok_or_else(ApiError::task_not_found)
    }

    // POST /tasks
    pub async fn create(
        State(state): State<SharedState>,
        body: Result<Json<CreateTaskRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<Task>), ApiError> {
        let Json(request) = body?;
        let task = Task::new(request.validate()?, Utc::now());

        state.repository.create_task(&task)?;
        info!(task_id = %task.id, "task created");

        Ok((StatusCode::CREATED, Json(task)))
    }

    // PUT /tasks/:id
    pub async fn update(
        State(state): State<SharedState>,
        Path(id): Path<String>,
        body: Result<Json<UpdateTaskRequest>, JsonRejection>,
    ) -> Result<Json<Task>, ApiError> {
        let Json(request) = body?;
        let changes = request.validate()?;
        let id = parse_id(&id)?;
        let now = Utc::now();

        let task = state
            .repository
            .update_task(id, &|task| task.apply(&changes, now))?
            .ok_or_else(ApiError::task_not_found)?;
        info!(task_id = %task.id, "task updated");

        Ok(Json(task))
    }

    // PATCH /tasks/:id/toggle
    pub async fn toggle(
        State(state): State<SharedState>,
        Path(id): Path<String>,
    ) -> Result<Json<Task>, ApiError> {
        let id = parse_id(&id)?;
        let now = Utc::now();

        let task = state
            .repository
            .update_task(id, &|task| task.toggle(now))?
            .ok_or_else(ApiError::task_not_found)?;
        info!(task_id = %task.id, completed = task.completed, "task toggled");

        Ok(Json(task))
    }

    // DELETE /tasks/:id
    pub async fn delete(
        State(state): State<SharedState>,
        Path(id): Path<String>,
    ) -> Result<Json<DeleteTaskResponse>, ApiError> {
        let id = parse_id(&id)?;

        if !state.repository.delete_task(id)? {
            return Err(ApiError::task_not_found());
        }
        info!(task_id = %id, "task deleted");

        Ok(Json(DeleteTaskResponse {
            message: "Task deleted".to_string(),
            id,
        }))
    }

    // POST /tasks/bulk
    pub async fn bulk(
        State(state): State<SharedState>,
        body: Result<Json<BulkActionRequest>, JsonRejection>,
    ) -> Result<Json<BulkActionResponse>, ApiError> {
        let Json(request) = body?;
        let (action, raw_ids) = request.validate()?;

        // Unknown ids are skipped; the reported count is what was asked for.
        let ids: Vec<Uuid> = raw_ids.iter().filter_map(|raw| Uuid::parse_str(raw).ok()).collect();
        let now = Utc::now();

        let affected = match action {
            BulkAction::Complete => state.repository.update_tasks(&ids, &|task| task.set_completed(true, now))?,
            BulkAction::Uncomplete => state.repository.update_tasks(&ids, &|task| task.set_completed(false, now))?,
            BulkAction::Delete => state.repository.delete_tasks(&ids)?,
        };
        info!(%action, requested = raw_ids.len(), affected, "bulk action applied");

        Ok(Json(BulkActionResponse {
            message: format!("Bulk {action} applied"),
            count: raw_ids.len(),
        }))
    }
}
