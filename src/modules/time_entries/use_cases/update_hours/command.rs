use rust_decimal::Decimal;

use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::{RawParams, parse_decimal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateHours {
    pub time_log: String,
    pub new_hours: Decimal,
}

impl UpdateHours {
    pub fn from_params(params: &RawParams) -> Result<Self, ApplicationError> {
        let time_log = params.required("time_log", "Time Log")?.to_string();
        let new_hours = parse_decimal(params.required("new_hours", "Hours")?, "Hours")?;
        Ok(Self { time_log, new_hours })
    }
}
