use chrono::NaiveDate;

use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::{Period, RawParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllEmployeesHours {
    pub period: Period,
}

impl AllEmployeesHours {
    pub fn from_params(params: &RawParams, today: NaiveDate) -> Result<Self, ApplicationError> {
        Ok(Self {
            period: Period::resolve(params.text("month"), params.text("year"), today)?,
        })
    }
}
