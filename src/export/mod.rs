//! Export module
//!
//! Resolves concrete bill instances over a date window and writes them for
//! calendars and spreadsheets:
//! - CSV: one row per bill instance (and amortization schedules)
//! - JSON: machine-readable document with the window metadata
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{BudgetCategory, Money};
use crate::services::date_cursor::next_on_or_after;
use crate::services::recurrence::occurrences_between;
use crate::state::PlannerState;

pub use self::csv::{write_amortization_csv, write_bill_instances_csv};
pub use self::json::{write_bill_export_json, BillExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::write_bill_export_yaml;

/// One dated occurrence of a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillInstance {
    pub name: String,
    pub amount_estimate: Money,
    pub due_date: NaiveDate,
    pub category: BudgetCategory,
    pub paid: bool,
    pub autopay: bool,
}

/// Every bill occurrence in `start..=end`, ordered by date then name
///
/// A recurring occurrence before the bill's stored next due date has already
/// been paid ahead and is marked paid.
pub fn resolve_bill_instances(state: &PlannerState, start: NaiveDate, end: NaiveDate) -> Vec<BillInstance> {
    let mut instances = Vec::new();

    for bill in &state.bills {
        for due_date in occurrences_between(bill, start, end) {
            instances.push(BillInstance {
                name: bill.name.clone(),
                amount_estimate: bill.amount_estimate,
                due_date,
                category: bill.category,
                paid: bill.next_due_date.is_some_and(|next| due_date < next),
                autopay: bill.autopay,
            });
        }
    }

    for bill in state.one_time_bills.iter().filter(|b| b.due_date >= start && b.due_date <= end) {
        instances.push(BillInstance {
            name: bill.name.clone(),
            amount_estimate: bill.amount,
            due_date: bill.due_date,
            category: bill.category,
            paid: bill.paid,
            autopay: false,
        });
    }

    for loan in state.assets.iter().filter(|l| l.principal().is_positive()) {
        let mut cursor = start;
        while cursor <= end {
            let due_date = next_on_or_after(cursor, loan.payment_frequency, loan.start_date);
            if due_date > end {
                break;
            }
            instances.push(BillInstance {
                name: loan.name.clone(),
                amount_estimate: loan.payment_amount,
                due_date,
                category: BudgetCategory::Debt,
                paid: false,
                autopay: false,
            });
            cursor = due_date + Duration::days(1);
        }
    }

    instances.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.name.cmp(&b.name)));
    instances
}

/// Output format for `billplan export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("Unknown export format '{}' (expected csv, json or yaml)", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetLoan, Frequency, OneTimeBill, RecurringBill};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> PlannerState {
        PlannerState::default()
            .with_bill(
                RecurringBill::monthly("Rent", Money::from_dollars(1200), 1)
                    .with_category(BudgetCategory::Housing)
                    .with_autopay(true)
                    .with_next_due_date(date(2024, 2, 1)),
            )
            .with_one_time_bill(OneTimeBill::new("Repair", Money::from_dollars(300), date(2024, 2, 10)))
            .with_asset(AssetLoan::new(
                "Car",
                Money::from_dollars(9000),
                5.0,
                Money::from_dollars(250),
                Frequency::Monthly,
                date(2023, 5, 20),
            ))
    }

    #[test]
    fn test_resolve_instances_over_window() {
        let instances = resolve_bill_instances(&state(), date(2024, 1, 1), date(2024, 2, 29));
        let summary: Vec<(&str, NaiveDate, bool)> = instances
            .iter()
            .map(|i| (i.name.as_str(), i.due_date, i.paid))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Rent", date(2024, 1, 1), true),
                ("Car", date(2024, 1, 20), false),
                ("Rent", date(2024, 2, 1), false),
                ("Repair", date(2024, 2, 10), false),
                ("Car", date(2024, 2, 20), false),
            ]
        );
        assert!(instances[0].autopay);
        assert_eq!(instances[1].category, BudgetCategory::Debt);
    }

    #[test]
    fn test_empty_window() {
        assert!(resolve_bill_instances(&state(), date(2024, 1, 2), date(2024, 1, 3)).is_empty());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("YML".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert!("ics".parse::<ExportFormat>().is_err());
    }
}
