use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};
use chrono::Utc;

use crate::modules::time_entries::use_cases::log_time::command::LogTime;
use crate::modules::time_entries::use_cases::log_time::handler::LogTimeReceipt;
use crate::shared::core::identity::Caller;
use crate::shared::core::params::RawParams;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlLogTimeReceipt {
    pub success: bool,
    pub time_log: String,
    pub message: String,
}

impl From<LogTimeReceipt> for GqlLogTimeReceipt {
    fn from(v: LogTimeReceipt) -> Self {
        Self {
            success: v.success,
            time_log: v.time_log,
            message: v.message,
        }
    }
}

#[derive(Default)]
pub struct LogTimeMutationRoot;

#[Object]
impl LogTimeMutationRoot {
    /// Hours are text so that a malformed value surfaces as a validation error.
    async fn log_time(
        &self,
        context: &Context<'_>,
        project: String,
        hours: String,
        description: Option<String>,
        log_date: Option<String>,
    ) -> GqlResult<GqlLogTimeReceipt> {
        let state = context.data_unchecked::<AppState>();
        let caller = context.data_opt::<Caller>().cloned().unwrap_or_else(Caller::guest);

        let params: RawParams = [
            ("project", Some(project)),
            ("hours", Some(hours)),
            ("description", description),
            ("log_date", log_date),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect();
        let command = LogTime::from_params(&params, Utc::now()).map_err(|e| e.extend())?;

        let receipt = state
            .log_time
            .handle(&caller, command)
            .await
            .map_err(|e| e.extend())?;
        Ok(receipt.into())
    }
}
