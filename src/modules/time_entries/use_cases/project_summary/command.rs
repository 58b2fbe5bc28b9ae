use chrono::NaiveDate;

use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::{Period, RawParams};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummaryQuery {
    pub project: String,
    /// `None` summarises all time.
    pub period: Option<Period>,
}

impl ProjectSummaryQuery {
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
        let period = match (month, year) {
            (None, None) => None,
            (month, year) => Some(Period::resolve(month, year, today)?),
        };
        Ok(Self {
            project: project.to_string(),
            period,
        })
    }
}

#[cfg(test)]
mod project_summary_query_tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[rstest]
    fn it_should_cover_all_time_without_month_or_year() {
        let params: RawParams = [("project", "PROJ-001")].into_iter().collect();
        let query = ProjectSummaryQuery::from_params(&params, today()).unwrap();
        assert_eq!(query.period, None);
    }

    #[rstest]
    fn it_should_fill_in_the_missing_half_of_the_period() {
        let params: RawParams = [("project", "PROJ-001"), ("month", "2")].into_iter().collect();
        let query = ProjectSummaryQuery::from_params(&params, today()).unwrap();
        assert_eq!(query.period, Some(Period::new(2, 2024).unwrap()));
    }

    #[rstest]
    fn it_should_require_a_project() {
        let params = RawParams::default();
        assert_eq!(
            ProjectSummaryQuery::from_params(&params, today()),
            Err(ApplicationError::validation("Project is required"))
        );
    }
}
