use axum::{extract::State, response::IntoResponse};

use crate::modules::time_entries::use_cases::update_hours::command::UpdateHours;
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
        let command = UpdateHours::from_params(&params)?;
        state.update_hours.handle(&caller, command).await
    }
    .await;
    respond(result)
}
