use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::modules::billing::core::invoice::{Invoice, InvoiceLine};
use crate::modules::billing::use_cases::generate_invoice::command::GenerateInvoice;
use crate::shared::core::identity::Caller;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlInvoiceLine {
    pub name: String,
    pub hours: Decimal,
    pub log_date: NaiveDate,
    pub logged_by: String,
    pub description: String,
}

impl From<InvoiceLine> for GqlInvoiceLine {
    fn from(v: InvoiceLine) -> Self {
        Self {
            name: v.name,
            hours: v.hours,
            log_date: v.log_date,
            logged_by: v.logged_by,
            description: v.description,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlInvoice {
    pub project: String,
    pub project_name: String,
    pub customer: Option<String>,
    pub month: u32,
    pub year: i32,
    pub total_hours: Decimal,
    pub billing_rate: Decimal,
    pub total_amount: Decimal,
    pub log_count: usize,
    pub logs: Vec<GqlInvoiceLine>,
    pub generated_on: NaiveDate,
    pub generated_by: String,
}

impl From<Invoice> for GqlInvoice {
    fn from(v: Invoice) -> Self {
        Self {
            project: v.project,
            project_name: v.project_name,
            customer: v.customer,
            month: v.month,
            year: v.year,
            total_hours: v.total_hours,
            billing_rate: v.billing_rate,
            total_amount: v.total_amount,
            log_count: v.log_count,
            logs: v.logs.into_iter().map(Into::into).collect(),
            generated_on: v.generated_on,
            generated_by: v.generated_by,
        }
    }
}

#[derive(Default)]
pub struct InvoiceQueryRoot;

#[Object]
impl InvoiceQueryRoot {
    async fn invoice(
        &self,
        context: &Context<'_>,
        project: String,
        month: Option<String>,
        year: Option<String>,
    ) -> GqlResult<GqlInvoice> {
        let state = context.data_unchecked::<AppState>();
        let caller = context.data_opt::<Caller>().cloned().unwrap_or_else(Caller::guest);
        let command = GenerateInvoice::new(
            &project,
            month.as_deref(),
            year.as_deref(),
            Utc::now().date_naive(),
        )
        .map_err(|e| e.extend())?;
        let invoice = state
            .generate_invoice
            .handle(&caller, command)
            .await
            .map_err(|e| e.extend())?;
        Ok(invoice.into())
    }
}
