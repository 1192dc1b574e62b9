use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
    pub id: Uuid,
}
