use axum::{Router, routing::{get, patch, post}};
use crate::{app_state::SharedState, task_controller::TaskController};

pub const ROUTER_PATH: &str = "/tasks";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(TaskController::list).post(TaskController::create))
        .route(format!("{}/bulk", ROUTER_PATH).as_str(), post(TaskController::bulk))
        .route(
            format!("{}/:id", ROUTER_PATH).as_str(),
            get(TaskController::get).put(TaskController::update).delete(TaskController::delete),
        )
        .route(format!("{}/:id/toggle", ROUTER_PATH).as_str(), patch(TaskController::toggle))
        .with_state(app_state)
}
