use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::{RawParams, parse_year};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportAnnualReport {
    pub year: i32,
}

impl ExportAnnualReport {
    pub fn from_params(params: &RawParams) -> Result<Self, ApplicationError> {
        Ok(Self {
            year: parse_year(params.required("year", "Year")?)?,
        })
    }
}
