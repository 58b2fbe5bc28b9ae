use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::modules::time_entries::use_cases::project_summary::command::ProjectSummaryQuery;
use crate::modules::time_entries::use_cases::project_summary::handler::ProjectSummary;
use crate::shared::core::identity::Caller;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlTimeLog {
    pub name: String,
    pub project: String,
    pub hours: Decimal,
    pub log_date: NaiveDate,
    pub logged_by: String,
    pub description: String,
}

impl From<TimeEntry> for GqlTimeLog {
    fn from(v: TimeEntry) -> Self {
        Self {
            name: v.name,
            project: v.project,
            hours: v.hours,
            log_date: v.log_date,
            logged_by: v.logged_by,
            description: v.description,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlProjectSummary {
    pub project: String,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub total_hours: Decimal,
    pub billing_rate: Decimal,
    pub total_amount: Decimal,
    pub log_count: usize,
    pub logs: Vec<GqlTimeLog>,
}

impl From<ProjectSummary> for GqlProjectSummary {
    fn from(v: ProjectSummary) -> Self {
        Self {
            project: v.project,
            month: v.period.map(|period| period.month),
            year: v.period.map(|period| period.year),
            total_hours: v.total_hours,
            billing_rate: v.billing_rate,
            total_amount: v.total_amount,
            log_count: v.log_count,
            logs: v.logs.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Default)]
pub struct ProjectSummaryQueryRoot;

#[Object]
impl ProjectSummaryQueryRoot {
    async fn project_summary(
        &self,
        context: &Context<'_>,
        project: String,
        month: Option<String>,
        year: Option<String>,
    ) -> GqlResult<GqlProjectSummary> {
        let state = context.data_unchecked::<AppState>();
        let caller = context.data_opt::<Caller>().cloned().unwrap_or_else(Caller::guest);
        let query = ProjectSummaryQuery::new(
            &project,
            month.as_deref(),
            year.as_deref(),
            Utc::now().date_naive(),
        )
        .map_err(|e| e.extend())?;
        let summary = state
            .project_summary
            .handle(&caller, query)
            .await
            .map_err(|e| e.extend())?;
        Ok(summary.into())
    }
}
