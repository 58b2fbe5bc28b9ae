use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maintained by administrators; read-only here except for the billing
/// snapshot kept up to date by the save hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub project_name: String,
    #[serde(default)]
    pub billing_rate: Option<Decimal>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub billed_hours: Decimal,
    #[serde(default)]
    pub billed_amount: Decimal,
}

impl Project {
    pub fn new(id: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_name: project_name.into(),
            billing_rate: None,
            customer: None,
            billed_hours: Decimal::ZERO,
            billed_amount: Decimal::ZERO,
        }
    }

    pub fn with_billing_rate(mut self, rate: Decimal) -> Self {
        self.billing_rate = Some(rate);
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// Rate for raw aggregation, where an unset rate simply means zero.
    pub fn rate_or_zero(&self) -> Decimal {
        self.billing_rate.unwrap_or(Decimal::ZERO)
    }

    /// Rate for invoicing, where zero or unset is not billable.
    pub fn billable_rate(&self) -> Option<Decimal> {
        self.billing_rate.filter(|rate| !rate.is_zero())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBilling {
    pub billed_hours: Decimal,
    pub billed_amount: Decimal,
}
