//! JSON export
//!
//! A self-describing document: schema version, the window it covers and the
//! resolved bill instances.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::{resolve_bill_instances, BillInstance};
use crate::error::{PlannerError, PlannerResult};
use crate::models::Money;
use crate::state::PlannerState;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillExport {
    pub schema_version: String,
    pub app_version: String,
    /// The reference date the export was generated for
    pub generated_on: NaiveDate,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub total_amount: Money,
    pub bills: Vec<BillInstance>,
}

impl BillExport {
    /// Export every bill instance in the `days` following `today`
    pub fn from_state(state: &PlannerState, today: NaiveDate, days: u32) -> Self {
        let window_end = today + chrono::Duration::days(i64::from(days));
        let bills = resolve_bill_instances(state, today, window_end);
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_on: today,
            window_start: today,
            window_end,
            total_amount: bills.iter().map(|b| b.amount_estimate).sum(),
            bills,
        }
    }
}

pub fn write_bill_export_json<W: Write>(export: &BillExport, writer: W) -> PlannerResult<()> {
    serde_json::to_writer_pretty(writer, export).map_err(|e| PlannerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecurringBill;

    #[test]
    fn test_json_export() {
        let state = PlannerState::default()
            .with_bill(RecurringBill::monthly("Phone", Money::from_dollars(80), 15));
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let export = BillExport::from_state(&state, today, 90);

        assert_eq!(export.bills.len(), 3);
        assert_eq!(export.total_amount, Money::from_dollars(240));
        assert_eq!(export.window_end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

        let mut output = Vec::new();
        write_bill_export_json(&export, &mut output).unwrap();
        let parsed: BillExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, export);
    }
}
