use axum::{extract::State, response::IntoResponse};
use chrono::Utc;

use crate::modules::time_entries::use_cases::project_summary::command::ProjectSummaryQuery;
use crate::shared::core::identity::Caller;
use crate::shared::core::params::RawParams;
use crate::shell::http::respond;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    caller: Caller,
    params: RawParams,
) -> impl IntoResponse {
    let result = async {
        let query = ProjectSummaryQuery::from_params(&params, Utc::now().date_naive())?;
        state.project_summary.handle(&caller, query).await
    }
    .await;
    respond(result)
}
