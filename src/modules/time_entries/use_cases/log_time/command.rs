use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::modules::time_entries::core::time_entry::NewTimeEntry;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::{RawParams, coerce_decimal, parse_date, parse_decimal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTime {
    pub project: String,
    pub hours: Decimal,
    pub description: Option<String>,
    pub log_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl LogTime {
    pub fn from_params(params: &RawParams, created_at: DateTime<Utc>) -> Result<Self, ApplicationError> {
        let project = params.required("project", "Project")?.to_string();
        let hours = parse_decimal(params.required("hours", "Hours")?, "Hours")?;
        Ok(Self {
            project,
            hours,
            description: params.text("description").map(str::to_string),
            log_date: params.text("log_date").map(parse_date).transpose()?,
            created_at,
        })
    }

    /// One item of a bulk import. Hours may be a JSON number or numeric text.
    pub fn from_json(item: &Value, created_at: DateTime<Utc>) -> Result<Self, ApplicationError> {
        let Some(fields) = item.as_object() else {
            return Err(ApplicationError::validation("Each log must be an object"));
        };
        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let project = text("project")
            .ok_or_else(|| ApplicationError::validation("Project is required"))?
            .to_string();
        let hours = coerce_decimal(fields.get("hours").unwrap_or(&Value::Null), "Hours")?;
        Ok(Self {
            project,
            hours,
            description: text("description").map(str::to_string),
            log_date: text("log_date").map(parse_date).transpose()?,
            created_at,
        })
    }

    pub fn into_new_time_entry(self, logged_by: &str) -> NewTimeEntry {
        NewTimeEntry {
            log_date: self.log_date.unwrap_or(self.created_at.date_naive()),
            project: self.project,
            hours: self.hours,
            logged_by: logged_by.to_string(),
            description: self.description.unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}
