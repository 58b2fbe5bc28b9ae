use axum::{extract::State, response::IntoResponse};
use chrono::Utc;

use crate::modules::billing::use_cases::all_employees_hours::command::AllEmployeesHours;
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
        let query = AllEmployeesHours::from_params(&params, Utc::now().date_naive())?;
        state.all_employees_hours.handle(&caller, query).await
    }
    .await;
    respond(result)
}
