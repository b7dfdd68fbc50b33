//! Paycheck and amortization tables

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::format_date;
use crate::config::settings::Settings;
use crate::models::{PaycheckEvent, PlannerFlag};
use crate::services::amortization::AmortizationSchedule;

#[derive(Tabled)]
struct PaycheckRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Upcoming paychecks, one row each
pub fn format_paychecks(events: &[PaycheckEvent], settings: &Settings) -> String {
    if events.is_empty() {
        return "No pay schedule configured.".to_string();
    }

    let rows: Vec<PaycheckRow> = events
        .iter()
        .enumerate()
        .map(|(i, event)| PaycheckRow {
            index: i + 1,
            date: format_date(event.date, settings),
            amount: settings.format_money(event.amount),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()))
        .to_string()
}

#[derive(Tabled)]
struct AmortizationTableRow {
    #[tabled(rename = "Period")]
    period: u32,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Full amortization table with totals and any outcome notes
pub fn format_amortization(name: &str, schedule: &AmortizationSchedule, settings: &Settings) -> String {
    let mut output = format!("Amortization: {}\n", name);

    if schedule.is_non_amortizing() {
        output.push_str("Payment does not cover the periodic interest; the loan never amortizes.\n");
        return output;
    }
    if schedule.rows.is_empty() {
        output.push_str("Nothing left to pay.\n");
        return output;
    }

    let rows: Vec<AmortizationTableRow> = schedule
        .rows
        .iter()
        .map(|row| AmortizationTableRow {
            period: row.period,
            date: format_date(row.date, settings),
            payment: settings.format_money(row.payment),
            principal: settings.format_money(row.principal),
            interest: settings.format_money(row.interest),
            balance: settings.format_money(row.balance),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    output.push_str(&table);
    output.push('\n');

    output.push_str(&format!(
        "Total paid {}, interest {}",
        settings.format_money(schedule.total_paid()),
        settings.format_money(schedule.total_interest())
    ));
    if let Some(date) = schedule.payoff_date() {
        output.push_str(&format!(", paid off {}", format_date(date, settings)));
    }
    output.push('\n');

    for flag in &schedule.flags {
        if let PlannerFlag::IterationCapReached { .. } = flag {
            output.push_str(&format!("Note: {}\n", flag));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use crate::services::amortization::{amortize, LoanTerms};
    use chrono::NaiveDate;

    fn terms(payment: i64) -> LoanTerms {
        LoanTerms {
            principal: Money::from_dollars(10_000),
            annual_rate: 6.0,
            payment: Money::from_dollars(payment),
            frequency: Frequency::Monthly,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_amortization_table_has_headers_and_rows() {
        let schedule = amortize(&terms(200), 1000);
        let output = format_amortization("Car", &schedule, &Settings::default());
        assert!(output.starts_with("Amortization: Car"));
        assert!(output.contains("Principal"));
        assert!(output.contains("$9850.00"));
        assert!(output.contains("Total paid"));
    }

    #[test]
    fn test_non_amortizing_message() {
        let schedule = amortize(&terms(50), 1000);
        let output = format_amortization("Car", &schedule, &Settings::default());
        assert!(output.contains("never amortizes"));
    }

    #[test]
    fn test_paychecks_table() {
        let events = vec![PaycheckEvent::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            Money::from_dollars(2000),
        )];
        let output = format_paychecks(&events, &Settings::default());
        assert!(output.contains("2024-01-15"));
        assert!(output.contains("$2000.00"));
        assert_eq!(format_paychecks(&[], &Settings::default()), "No pay schedule configured.");
    }
}
