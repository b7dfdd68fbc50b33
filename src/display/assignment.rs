//! Paycheck assignment display
//!
//! Shows the next two paychecks side by side in sequence, each with its
//! bills, total and leftover.

use super::{format_date, separator, truncate};
use crate::config::settings::Settings;
use crate::services::assignment::{Check, PaycheckAssignment};

/// Format the two-paycheck split
pub fn format_assignment(assignment: &PaycheckAssignment, settings: &Settings) -> String {
    if assignment.is_empty() {
        return "No pay schedule configured. Run 'billplan schedule set' first.".to_string();
    }

    let mut output = String::new();
    for (index, check) in [Check::Check1, Check::Check2].into_iter().enumerate() {
        let header = match assignment.pay_dates.get(index) {
            Some(date) => format!(
                "Paycheck {} - {} ({})",
                index + 1,
                format_date(*date, settings),
                settings.format_money(assignment.pay_amount(check))
            ),
            None => format!("Paycheck {}", index + 1),
        };
        output.push_str(&header);
        output.push('\n');
        output.push_str(&separator(50));
        output.push('\n');

        let bills = assignment.bills(check);
        if bills.is_empty() {
            output.push_str("  (no bills)\n");
        }
        for bill in bills {
            let marker = if bill.autopay { " [auto]" } else { "" };
            output.push_str(&format!(
                "  {:<12} {:<24} {:>12}{}\n",
                format_date(bill.due_date, settings),
                truncate(&bill.name, 24),
                settings.format_money(bill.amount),
                marker
            ));
        }

        output.push_str(&format!(
            "  {:<37} {:>12}\n",
            "Bills",
            settings.format_money(assignment.total(check))
        ));
        output.push_str(&format!(
            "  {:<37} {:>12}\n\n",
            "Leftover",
            settings.format_money(assignment.leftover(check))
        ));
    }

    if let Some(moved) = &assignment.balancing_move {
        output.push_str(&format!(
            "Balanced: moved {} from {} to {} (gap {} -> {})\n",
            moved.name,
            moved.from,
            moved.to,
            settings.format_money(moved.difference_before),
            settings.format_money(moved.difference_after)
        ));
    }

    output
}
