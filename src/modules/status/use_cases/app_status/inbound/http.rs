use axum::response::IntoResponse;

use crate::modules::status::use_cases::app_status::handler::app_status;
use crate::shared::core::identity::Caller;
use crate::shell::http::respond;

pub async fn handle(caller: Caller) -> impl IntoResponse {
    respond(Ok(app_status(&caller)))
}
