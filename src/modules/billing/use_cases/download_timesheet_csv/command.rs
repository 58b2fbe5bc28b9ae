use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::{Period, RawParams, parse_month, parse_year};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTimesheetCsv {
    pub project: String,
    pub period: Period,
}

impl DownloadTimesheetCsv {
    pub fn from_params(params: &RawParams) -> Result<Self, ApplicationError> {
        let project = params.required("project", "Project")?.to_string();
        let month = parse_month(params.required("month", "Month")?)?;
        let year = parse_year(params.required("year", "Year")?)?;
        Ok(Self {
            project,
            period: Period::new(month, year)?,
        })
    }
}
