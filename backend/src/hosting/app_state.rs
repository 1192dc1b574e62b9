use std::sync::Arc;
use crate::data_access::task_repository::TaskRepository;

pub struct AppState {
    pub repository: Box<dyn TaskRepository>,
}

impl AppState {
    pub fn new(repository: impl TaskRepository + 'static) -> SharedState {
        Arc::new(AppState {
            repository: Box::new(repository),
        })
    }
}

pub type SharedState = Arc<AppState>;
