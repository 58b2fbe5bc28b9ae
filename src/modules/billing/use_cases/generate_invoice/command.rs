use chrono::NaiveDate;

use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::{Period, RawParams};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateInvoice {
    pub project: String,
    pub period: Period,
    pub requested_on: NaiveDate,
}

impl GenerateInvoice {
    /// Month and year default to those of `today`, each on its own.
    pub fn from_params(params: &RawParams, today: NaiveDate) -> Result<Self, ApplicationError> {
        Self::new(
            params.required("project", "Project")?,
            params.text("month"),
            params.text("year"),
            today,
        )
    }

    pub fn new(
        project: &str,
        month: Option<&str>,
        year: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, ApplicationError> {
        Ok(Self {
            project: project.to_string(),
            period: Period::resolve(month, year, today)?,
            requested_on: today,
        })
    }
}
