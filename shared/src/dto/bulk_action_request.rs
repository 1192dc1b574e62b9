use serde::{Deserialize, Serialize};

use crate::{bulk_action::BulkAction, validation_error::ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkActionRequest {
    #[serde(default)]
    pub action: Option<BulkAction>,
    #[serde(default)]
    pub ids: Option<Vec<String>>,
}

impl BulkActionRequest {
    pub fn new(action: BulkAction, ids: Vec<String>) -> Self {
        Self { action: Some(action), ids: Some(ids) }
    }

    pub fn validate(&self) -> Result<(BulkAction, &[String]), ValidationError> {
        let ids = match self.ids.as_deref() {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Err(ValidationError::new("ids must be a non-empty array")),
        };
        let action = self
            .action
            .ok_or_else(|| ValidationError::new("action must be one of: complete, uncomplete, delete"))?;
        Ok((action, ids))
    }
}
