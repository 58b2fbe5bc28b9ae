use axum::{extract::State, response::IntoResponse};
use chrono::Utc;

use crate::modules::billing::use_cases::generate_invoice::command::GenerateInvoice;
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
        let command = GenerateInvoice::from_params(&params, Utc::now().date_naive())?;
        state.generate_invoice.handle(&caller, command).await
    }
    .await;
    respond(result)
}
