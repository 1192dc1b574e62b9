//! HTTP access to the task API.
//!
//! `TaskApi` is the seam the state container is written against; `HttpTaskApi`
//! is the real implementation backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    RequestBuilder,
};
use serde::de::DeserializeOwned;
use taskboard_shared::{
    bulk_action_request::BulkActionRequest, bulk_action_response::BulkActionResponse,
    create_task_request::CreateTaskRequest, delete_task_response::DeleteTaskResponse, task::Task,
    task_filter::TaskFilter, update_task_request::UpdateTaskRequest,
};
use uuid::Uuid;

use super::client_error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError>;

    async fn get_task(&self, id: Uuid) -> Result<Task, ClientError>;

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ClientError>;

    async fn update_task(&self, id: Uuid, request: &UpdateTaskRequest) -> Result<Task, ClientError>;

    async fn toggle_task(&self, id: Uuid) -> Result<Task, ClientError>;

    async fn delete_task(&self, id: Uuid) -> Result<DeleteTaskResponse, ClientError>;

    async fn bulk_action(&self, request: &BulkActionRequest) -> Result<BulkActionResponse, ClientError>;
}

/// Query pairs for the list endpoint. Only values that carry information are
/// sent: status and sort always have one, priority only when set, search only
/// when it is not blank.
pub fn filter_query(filter: &TaskFilter) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("status", filter.status.as_str().to_string())];
    if let Some(priority) = filter.priority {
        pairs.push(("priority", priority.as_str().to_string()));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        pairs.push(("search", search.to_string()));
    }
    pairs.push(("sortBy", filter.sort_by.as_str().to_string()));
    pairs
}

pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    /// `base_url` includes the API prefix, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let error = ClientError::from_response(status.as_u16(), &body);
            tracing::debug!(status = status.as_u16(), message = %error, "request failed");
            return Err(error);
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ClientError> {
        self.send(self.client.get(self.url("/tasks")).query(&filter_query(filter))).await
    }

    async fn get_task(&self, id: Uuid) -> Result<Task, ClientError> {
        self.send(self.client.get(self.url(&format!("/tasks/{id}")))).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ClientError> {
        self.send(self.client.post(self.url("/tasks")).json(request)).await
    }

    async fn update_task(&self, id: Uuid, request: &UpdateTaskRequest) -> Result<Task, ClientError> {
        self.send(self.client.put(self.url(&format!("/tasks/{id}"))).json(request)).await
    }

    async fn toggle_task(&self, id: Uuid) -> Result<Task, ClientError> {
        self.send(self.client.patch(self.url(&format!("/tasks/{id}/toggle")))).await
    }

    async fn delete_task(&self, id: Uuid) -> Result<DeleteTaskResponse, ClientError> {
        self.send(self.client.delete(self.url(&format!("/tasks/{id}")))).await
    }

    async fn bulk_action(&self, request: &BulkActionRequest) -> Result<BulkActionResponse, ClientError> {
        self.send(self.client.post(self.url("/tasks/bulk")).json(request)).await
    }
}
