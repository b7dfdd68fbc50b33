//! CSV export
//!
//! Bill instances for spreadsheets and calendar imports, plus amortization
//! schedules. Amounts are written as plain decimal dollars.

use serde::Serialize;
use std::io::Write;

use super::BillInstance;
use crate::error::{PlannerError, PlannerResult};
use crate::models::Money;
use crate::services::amortization::AmortizationSchedule;

#[derive(Serialize)]
struct BillRow<'a> {
    #[serde(rename = "Due Date")]
    due_date: String,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Paid")]
    paid: bool,
    #[serde(rename = "Autopay")]
    autopay: bool,
}

#[derive(Serialize)]
struct ScheduleRow {
    #[serde(rename = "Period")]
    period: u32,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Payment")]
    payment: String,
    #[serde(rename = "Principal")]
    principal: String,
    #[serde(rename = "Interest")]
    interest: String,
    #[serde(rename = "Balance")]
    balance: String,
}

pub fn write_bill_instances_csv<W: Write>(instances: &[BillInstance], writer: W) -> PlannerResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    for instance in instances {
        csv_writer.serialize(BillRow {
            due_date: instance.due_date.to_string(),
            name: &instance.name,
            amount: decimal(instance.amount_estimate),
            category: instance.category.as_str(),
            paid: instance.paid,
            autopay: instance.autopay,
        })?;
    }
    csv_writer
        .flush()
        .map_err(|e| PlannerError::Export(e.to_string()))
}

pub fn write_amortization_csv<W: Write>(schedule: &AmortizationSchedule, writer: W) -> PlannerResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    for row in &schedule.rows {
        csv_writer.serialize(ScheduleRow {
            period: row.period,
            date: row.date.to_string(),
            payment: decimal(row.payment),
            principal: decimal(row.principal),
            interest: decimal(row.interest),
            balance: decimal(row.balance),
        })?;
    }
    csv_writer
        .flush()
        .map_err(|e| PlannerError::Export(e.to_string()))
}

fn decimal(amount: Money) -> String {
    format!("{:.2}", amount.as_dollars_f64())
}
