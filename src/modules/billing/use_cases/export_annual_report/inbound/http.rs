use axum::{extract::State, response::IntoResponse};

use crate::modules::billing::use_cases::export_annual_report::command::ExportAnnualReport;
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
        let command = ExportAnnualReport::from_params(&params)?;
        state.export_annual_report.handle(&caller, command).await
    }
    .await;
    respond(result)
}
