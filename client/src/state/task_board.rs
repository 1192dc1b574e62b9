//! Client-side task collection with optimistic mutations.
//!
//! Every add/update/toggle/delete is applied to the local list before the
//! request goes out. A success swaps in the server's copy; a failure refetches
//! the whole list and exposes the error message. Refreshes are numbered and
//! only the most recently issued one may write the list.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use taskboard_shared::{
    bulk_action::BulkAction, bulk_action_request::BulkActionRequest,
    bulk_action_response::BulkActionResponse, create_task_request::CreateTaskRequest, task::Task,
    task_filter::TaskFilter, update_task_request::UpdateTaskRequest,
};
use tracing::{debug, warn};
use uuid::Uuid;

use super::mutation::{MutationKind, PendingMutation};
use crate::api::{api_client::TaskApi, client_error::ClientError};

/// Settled mutations kept around for inspection.
const MUTATION_HISTORY: usize = 64;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    pub tasks: Vec<Task>,
    pub filter: TaskFilter,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct BoardState {
    tasks: Vec<Task>,
    filter: TaskFilter,
    loading: bool,
    error: Option<String>,
    refresh_seq: u64,
    mutation_seq: u64,
    mutations: Vec<PendingMutation>,
}

impl BoardState {
    fn begin(&mut self, kind: MutationKind, task_id: Uuid) -> u64 {
        self.mutation_seq += 1;
        let seq = self.mutation_seq;
        self.mutations.push(PendingMutation::new(seq, kind, task_id));

        if self.mutations.len() > MUTATION_HISTORY {
            if let Some(pos) = self.mutations.iter().position(|m| !m.is_pending()) {
                self.mutations.remove(pos);
            }
        }
        seq
    }

    fn settle(&mut self, seq: u64, confirmed: bool) {
        if let Some(mutation) = self.mutations.iter_mut().find(|m| m.seq == seq) {
            if confirmed {
                mutation.confirm();
            } else {
                mutation.roll_back();
            }
        }
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn replace(&mut self, id: Uuid, task: Task) {
        match self.position(id) {
            Some(pos) => self.tasks[pos] = task,
            None => debug!(task_id = %id, "reconciled task no longer in view"),
        }
    }
}

pub struct TaskBoard<A: TaskApi> {
    api: Arc<A>,
    state: Arc<Mutex<BoardState>>,
}

impl<A: TaskApi> Clone for TaskBoard<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
        }
    }
}

impl<A: TaskApi> TaskBoard<A> {
    /// Starts empty; call [`TaskBoard::refresh`] to load.
    pub fn new(api: A) -> Self {
        Self::with_filter(api, TaskFilter::default())
    }

    pub fn with_filter(api: A, filter: TaskFilter) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(BoardState { filter, ..Default::default() })),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let state = self.state.lock();
        BoardSnapshot {
            tasks: state.tasks.clone(),
            filter: state.filter.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.state.lock().error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn filter(&self) -> TaskFilter {
        self.state.lock().filter.clone()
    }

    pub fn pending_mutations(&self) -> Vec<PendingMutation> {
        self.state.lock().mutations.clone()
    }

    /// Reloads the list for the current filter.
    ///
    /// A response that arrives after a newer refresh was issued is dropped and
    /// the call returns `Ok(())` without touching state.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let (ticket, filter) = {
            let mut state = self.state.lock();
            state.refresh_seq += 1;
            state.loading = true;
            (state.refresh_seq, state.filter.clone())
        };

        let result = self.api.list_tasks(&filter).await;

        let mut state = self.state.lock();
        if ticket != state.refresh_seq {
            debug!(ticket, latest = state.refresh_seq, "discarding stale task list");
            return Ok(());
        }
        state.loading = false;

        match result {
            Ok(tasks) => {
                state.tasks = tasks;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Refreshes only when the filter actually changed.
    pub async fn set_filter(&self, filter: TaskFilter) -> Result<(), ClientError> {
        {
            let mut state = self.state.lock();
            if state.filter == filter {
                return Ok(());
            }
            state.filter = filter;
        }
        self.refresh().await
    }

    pub async fn add_task(&self, request: CreateTaskRequest) -> Result<Task, ClientError> {
        let provisional_id = Uuid::new_v4();
        let seq = {
            let mut state = self.state.lock();
            // Nothing to show if the server is going to reject it anyway.
            if let Ok(new_task) = request.validate() {
                state.tasks.insert(0, Task::with_id(provisional_id, new_task, Utc::now()));
            }
            state.begin(MutationKind::Create, provisional_id)
        };

        match self.api.create_task(&request).await {
            Ok(task) => {
                let mut state = self.state.lock();
                match state.position(provisional_id) {
                    Some(pos) => state.tasks[pos] = task.clone(),
                    None if state.position(task.id).is_none() => state.tasks.insert(0, task.clone()),
                    None => {}
                }
                state.settle(seq, true);
                Ok(task)
            }
            Err(e) => Err(self.revert(seq, e).await),
        }
    }

    pub async fn update_task(&self, id: Uuid, request: UpdateTaskRequest) -> Result<Task, ClientError> {
        let seq = {
            let mut state = self.state.lock();
            if let (Ok(changes), Some(pos)) = (request.validate(), state.position(id)) {
                state.tasks[pos].apply(&changes, Utc::now());
            }
            state.begin(MutationKind::Update, id)
        };

        self.reconcile(seq, id, self.api.update_task(id, &request).await).await
    }

    pub async fn toggle_task(&self, id: Uuid) -> Result<Task, ClientError> {
        let seq = {
            let mut state = self.state.lock();
            if let Some(pos) = state.position(id) {
                state.tasks[pos].toggle(Utc::now());
            }
            state.begin(MutationKind::Toggle, id)
        };

        self.reconcile(seq, id, self.api.toggle_task(id).await).await
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        let seq = {
            let mut state = self.state.lock();
            state.tasks.retain(|t| t.id != id);
            state.begin(MutationKind::Delete, id)
        };

        match self.api.delete_task(id).await {
            Ok(_) => {
                self.state.lock().settle(seq, true);
                Ok(())
            }
            Err(e) => Err(self.revert(seq, e).await),
        }
    }

    /// Not optimistic: the list is refetched once the server confirms.
    pub async fn bulk_action(&self, action: BulkAction, ids: Vec<Uuid>) -> Result<BulkActionResponse, ClientError> {
        let request = BulkActionRequest::new(action, ids.iter().map(Uuid::to_string).collect());

        let response = match self.api.bulk_action(&request).await {
            Ok(response) => response,
            Err(e) => {
                self.state.lock().error = Some(e.message());
                return Err(e);
            }
        };

        self.refresh().await?;
        Ok(response)
    }

    async fn reconcile(&self, seq: u64, id: Uuid, result: Result<Task, ClientError>) -> Result<Task, ClientError> {
        match result {
            Ok(task) => {
                let mut state = self.state.lock();
                state.replace(id, task.clone());
                state.settle(seq, true);
                Ok(task)
            }
            Err(e) => Err(self.revert(seq, e).await),
        }
    }

    /// Drops optimistic changes by reloading the authoritative list, then
    /// records the failure that caused it.
    async fn revert(&self, seq: u64, error: ClientError) -> ClientError {
        if let Err(refetch) = self.refresh().await {
            warn!(error = %refetch, "refetch after failed mutation also failed");
        }

        let mut state = self.state.lock();
        state.settle(seq, false);
        state.error = Some(error.message());
        error
    }
}
