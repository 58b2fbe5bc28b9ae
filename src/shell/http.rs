use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;

use crate::modules::billing::use_cases::all_employees_hours::inbound::http as all_employees_hours_http;
use crate::modules::billing::use_cases::download_timesheet_csv::inbound::http as download_timesheet_csv_http;
use crate::modules::billing::use_cases::export_annual_report::inbound::http as export_annual_report_http;
use crate::modules::billing::use_cases::generate_invoice::inbound::http as generate_invoice_http;
use crate::modules::status::use_cases::app_status::inbound::http as app_status_http;
use crate::modules::time_entries::use_cases::bulk_log_time::inbound::http as bulk_log_time_http;
use crate::modules::time_entries::use_cases::log_time::inbound::http as log_time_http;
use crate::modules::time_entries::use_cases::project_summary::inbound::http as project_summary_http;
use crate::modules::time_entries::use_cases::update_hours::inbound::http as update_hours_http;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

/// Every operation answers GET and POST alike; parameters are read from the
/// query string and the body.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/method/app_status", get(app_status_http::handle).post(app_status_http::handle))
        .route("/api/method/log_time", get(log_time_http::handle).post(log_time_http::handle))
        .route(
            "/api/method/bulk_log_time",
            get(bulk_log_time_http::handle).post(bulk_log_time_http::handle),
        )
        .route(
            "/api/method/update_hours",
            get(update_hours_http::handle).post(update_hours_http::handle),
        )
        .route(
            "/api/method/project_summary",
            get(project_summary_http::handle).post(project_summary_http::handle),
        )
        .route(
            "/api/method/generate_invoice",
            get(generate_invoice_http::handle).post(generate_invoice_http::handle),
        )
        .route(
            "/api/method/export_annual_report",
            get(export_annual_report_http::handle).post(export_annual_report_http::handle),
        )
        .route(
            "/api/method/download_timesheet_csv",
            get(download_timesheet_csv_http::handle).post(download_timesheet_csv_http::handle),
        )
        .route(
            "/api/method/all_employees_hours",
            get(all_employees_hours_http::handle).post(all_employees_hours_http::handle),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    exc_type: &'a str,
    message: String,
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = match self {
            ApplicationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationError::Permission(_) => StatusCode::FORBIDDEN,
            ApplicationError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            exc_type: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct MessageBody<T> {
    message: T,
}

/// Wraps a payload as `{"message": ...}`, or renders the error.
pub fn respond<T: Serialize>(result: Result<T, ApplicationError>) -> Response {
    match result {
        Ok(message) => Json(MessageBody { message }).into_response(),
        Err(error) => error.into_response(),
    }
}
