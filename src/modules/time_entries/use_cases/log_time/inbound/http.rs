use axum::{extract::State, response::IntoResponse};
use chrono::Utc;

use crate::modules::time_entries::use_cases::log_time::command::LogTime;
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
        let command = LogTime::from_params(&params, Utc::now())?;
        state.log_time.handle(&caller, command).await
    }
    .await;
    respond(result)
}
