//! Bill list and flag display

use chrono::NaiveDate;

use super::{format_date, truncate};
use crate::config::settings::Settings;
use crate::models::PlannerFlag;
use crate::services::recurrence::next_due_on_or_after;
use crate::state::PlannerState;

/// Recurring bills, one-time bills and loans with their next due dates
pub fn format_bill_list(state: &PlannerState, today: NaiveDate, settings: &Settings) -> String {
    if state.bills.is_empty() && state.one_time_bills.is_empty() && state.assets.is_empty() {
        return "No bills found.".to_string();
    }

    let mut output = String::new();

    if !state.bills.is_empty() {
        output.push_str(&format!(
            "{:<10} {:<24} {:>12} {:<12} {:<12} {}\n",
            "ID", "Bill", "Estimate", "Frequency", "Next due", "Flags"
        ));
        output.push_str(&format!(
            "{:-<10} {:-<24} {:->12} {:-<12} {:-<12} {:-<12}\n",
            "", "", "", "", "", ""
        ));
        for bill in &state.bills {
            let next_due = bill
                .next_due_date
                .unwrap_or_else(|| next_due_on_or_after(bill, today));
            let mut flags = Vec::new();
            if bill.autopay {
                flags.push("autopay");
            }
            if bill.variable {
                flags.push("variable");
            }
            if bill.paid {
                flags.push("paid");
            }
            let short_id = bill.id.to_string();
            output.push_str(&format!(
                "{:<10} {:<24} {:>12} {:<12} {:<12} {}\n",
                &short_id[..8.min(short_id.len())],
                truncate(&bill.name, 24),
                settings.format_money(bill.amount_estimate),
                bill.frequency,
                format_date(next_due, settings),
                flags.join(",")
            ));
        }
    }

    if !state.one_time_bills.is_empty() {
        output.push_str("\nOne-time bills\n");
        for bill in &state.one_time_bills {
            output.push_str(&format!(
                "  {:<24} {:>12} {:<12} {}\n",
                truncate(&bill.name, 24),
                settings.format_money(bill.amount),
                format_date(bill.due_date, settings),
                if bill.paid { "paid" } else { "" }
            ));
        }
    }

    if !state.assets.is_empty() {
        output.push_str("\nLoans\n");
        for loan in &state.assets {
            output.push_str(&format!(
                "  {:<24} {:>12} every {} at {:.2}% (balance {})\n",
                truncate(&loan.name, 24),
                settings.format_money(loan.payment_amount),
                loan.payment_frequency,
                loan.interest_rate,
                settings.format_money(loan.principal())
            ));
        }
    }

    output
}

/// Data-quality notes, or nothing when the data is clean
pub fn format_flags(flags: &[PlannerFlag]) -> String {
    if flags.is_empty() {
        return String::new();
    }
    let mut output = String::from("Data notes:\n");
    for flag in flags {
        output.push_str(&format!("  - {}\n", flag));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, OneTimeBill, RecurringBill};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_list() {
        let output = format_bill_list(&PlannerState::default(), date(2024, 1, 1), &Settings::default());
        assert_eq!(output, "No bills found.");
    }

    #[test]
    fn test_lists_bills_with_next_due() {
        let state = PlannerState::default()
            .with_bill(RecurringBill::monthly("Rent", Money::from_dollars(1200), 31).with_autopay(true))
            .with_one_time_bill(OneTimeBill::new("Repair", Money::from_dollars(300), date(2024, 2, 10)));
        let output = format_bill_list(&state, date(2024, 2, 5), &Settings::default());
        assert!(output.contains("Rent"));
        assert!(output.contains("2024-02-29"));
        assert!(output.contains("autopay"));
        assert!(output.contains("One-time bills"));
    }

    #[test]
    fn test_format_flags() {
        assert!(format_flags(&[]).is_empty());
        let output = format_flags(&[PlannerFlag::invalid_amount("Rent", "amount")]);
        assert!(output.contains("Rent: invalid amount"));
    }
}
