//! CLI command handlers
//!
//! Each submodule owns one clap subcommand tree and a `handle_*_command`
//! function that loads the state, runs the engine and prints the result.

pub mod bill;
pub mod budget;
pub mod config;
pub mod debt;
pub mod export;
pub mod loan;
pub mod schedule;

pub use bill::{handle_bill_command, BillCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use debt::{handle_debt_command, DebtCommands};
pub use export::{handle_export_command, ExportArgs};
pub use loan::{handle_loan_command, LoanCommands};
pub use schedule::{handle_assign_command, handle_schedule_command, ScheduleCommands};

use chrono::NaiveDate;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetCategory, Frequency, Money, MonthKey};

/// Parse a user-entered amount ("1200", "$1,200.50")
pub fn parse_money(input: &str) -> PlannerResult<Money> {
    Money::parse(input)
        .map_err(|e| PlannerError::Validation(format!("Invalid amount '{}': {}", input, e)))
}

pub fn parse_date(input: &str) -> PlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        PlannerError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", input))
    })
}

pub fn parse_month(input: &str) -> PlannerResult<MonthKey> {
    MonthKey::parse(input)
        .map_err(|e| PlannerError::Validation(format!("Invalid month '{}': {}", input, e)))
}

pub fn parse_category(input: &str) -> PlannerResult<BudgetCategory> {
    BudgetCategory::parse(input)
        .ok_or_else(|| PlannerError::Validation(format!("Unknown category: {}", input)))
}

/// Parse a frequency and check it is allowed where it is used
pub fn parse_frequency(input: &str, allowed: fn(&Frequency) -> bool) -> PlannerResult<Frequency> {
    match Frequency::parse(input) {
        Some(frequency) if allowed(&frequency) => Ok(frequency),
        Some(frequency) => Err(PlannerError::Validation(format!(
            "Frequency '{}' is not supported here",
            frequency
        ))),
        None => Err(PlannerError::Validation(format!("Unknown frequency: {}", input))),
    }
}

/// Parse a rate given as "6.5" or "6.5%"
pub fn parse_rate(input: &str) -> PlannerResult<f64> {
    let rate: f64 = input
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| PlannerError::Validation(format!("Invalid interest rate: {}", input)))?;
    if !rate.is_finite() || rate < 0.0 {
        return Err(PlannerError::Validation(format!("Invalid interest rate: {}", input)));
    }
    Ok(rate)
}
