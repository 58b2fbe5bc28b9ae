use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::RawParams;

/// Items stay untyped here; each one is coerced on its own so that a bad item
/// fails alone.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkLogTime {
    pub items: Vec<Value>,
    pub created_at: DateTime<Utc>,
}

impl BulkLogTime {
    pub fn from_params(params: &RawParams, created_at: DateTime<Utc>) -> Result<Self, ApplicationError> {
        Self::from_json_text(params.required("logs", "Logs")?, created_at)
    }

    pub fn from_json_text(raw: &str, created_at: DateTime<Utc>) -> Result<Self, ApplicationError> {
        let parsed: Value = serde_json::from_str(raw)
            .map_err(|e| ApplicationError::validation(format!("logs must be valid JSON: {e}")))?;
        match parsed {
            Value::Array(items) => Ok(Self { items, created_at }),
            _ => Err(ApplicationError::validation("logs must be a list")),
        }
    }
}
