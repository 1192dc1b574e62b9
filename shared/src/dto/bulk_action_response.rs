use serde::{Deserialize, Serialize};

/// `count` is the number of ids requested, not the number that existed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkActionResponse {
    pub message: String,
    pub count: usize,
}
