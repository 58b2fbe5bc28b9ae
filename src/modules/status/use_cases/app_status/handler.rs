use serde::Serialize;

use crate::shared::core::identity::Caller;

pub const APP_NAME: &str = "Time Tracker";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppStatus {
    pub status: &'static str,
    pub app: &'static str,
    pub version: &'static str,
    pub user: String,
}

pub fn app_status(caller: &Caller) -> AppStatus {
    AppStatus {
        status: "ok",
        app: APP_NAME,
        version: env!("CARGO_PKG_VERSION"),
        user: caller.user.clone(),
    }
}
