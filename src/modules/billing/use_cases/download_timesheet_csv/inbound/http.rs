use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::modules::billing::use_cases::download_timesheet_csv::command::DownloadTimesheetCsv;
use crate::shared::core::identity::Caller;
use crate::shared::core::params::RawParams;
use crate::shell::state::AppState;

/// Answers with the file itself rather than the usual `{"message": ...}` envelope.
pub async fn handle(State(state): State<AppState>, caller: Caller, params: RawParams) -> Response {
    let result = async {
        let command = DownloadTimesheetCsv::from_params(&params)?;
        state.download_timesheet_csv.handle(&caller, command).await
    }
    .await;

    match result {
        Ok(file) => (
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.file_name),
                ),
            ],
            file.content,
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}
