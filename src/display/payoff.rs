//! Debt payoff display

use super::{format_date, format_percentage, separator, truncate};
use crate::config::settings::Settings;
use crate::services::payoff::{DebtPortfolioSummary, PayoffOutcome};

/// Payoff projection for a single debt
pub fn format_payoff(name: &str, outcome: &PayoffOutcome, settings: &Settings) -> String {
    let mut output = format!("Payoff: {}\n", name);
    output.push_str(&separator(40));
    output.push('\n');

    match outcome {
        PayoffOutcome::PaymentTooLow {
            monthly_interest,
            payment,
        } => {
            output.push_str(&format!(
                "Payment {} does not cover monthly interest of {}.\n",
                settings.format_money(*payment),
                settings.format_money(*monthly_interest)
            ));
            output.push_str("This debt will never be paid off at the current payment.\n");
        }
        PayoffOutcome::PaidOff(projection) => {
            output.push_str(&format!("{:<16} {}\n", "Months", projection.months));
            output.push_str(&format!(
                "{:<16} {}\n",
                "Payoff date",
                format_date(projection.payoff_date, settings)
            ));
            output.push_str(&format!(
                "{:<16} {}\n",
                "Total interest",
                settings.format_money(projection.total_interest)
            ));
            output.push_str(&format!(
                "{:<16} {}\n",
                "Total paid",
                settings.format_money(projection.total_paid)
            ));
            for flag in &projection.flags {
                output.push_str(&format!("Note: {}\n", flag));
            }
        }
    }

    output
}

/// Portfolio table with totals and the debt-free date
pub fn format_portfolio(summary: &DebtPortfolioSummary, settings: &Settings) -> String {
    if summary.lines.is_empty() {
        return "No debts tracked.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>12} {:>10} {:>8} {:>12} {:>9}\n",
        "Debt", "Balance", "Payment", "Months", "Payoff", "Progress"
    ));
    output.push_str(&separator(76));
    output.push('\n');

    for line in &summary.lines {
        let (months, payoff) = match line.outcome.projection() {
            Some(p) => (p.months.to_string(), format_date(p.payoff_date, settings)),
            None => ("never".to_string(), "-".to_string()),
        };
        let progress = line
            .progress_percent
            .map(format_percentage)
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<20} {:>12} {:>10} {:>8} {:>12} {:>9}\n",
            truncate(&line.name, 20),
            settings.format_money(line.balance),
            settings.format_money(line.payment),
            months,
            payoff,
            progress
        ));
    }

    output.push_str(&separator(76));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>12} {:>10}\n",
        "Total",
        settings.format_money(summary.total_balance),
        settings.format_money(summary.total_monthly_payment)
    ));
    output.push_str(&format!("Weighted rate: {:.2}%\n", summary.weighted_rate));
    output.push_str(&format!(
        "Projected interest: {}\n",
        settings.format_money(summary.total_interest)
    ));
    match summary.debt_free_date {
        Some(date) => output.push_str(&format!("Debt free: {}\n", format_date(date, settings))),
        None => output.push_str(&format!(
            "Debt free: never ({} debt(s) not covered by payment)\n",
            summary.unpayable
        )),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Debt, Money};
    use crate::services::payoff::project_debt;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_payment_too_low_message() {
        let debt = Debt::new("Card", Money::from_dollars(5000), 20.0, Money::from_dollars(50));
        let output = format_payoff(&debt.name, &project_debt(&debt, today(), 1000), &Settings::default());
        assert!(output.contains("never be paid off"));
        assert!(output.contains("$83.33"));
    }

    #[test]
    fn test_paid_off_details() {
        let debt = Debt::new("Loan", Money::from_dollars(10_000), 6.0, Money::from_dollars(200));
        let output = format_payoff(&debt.name, &project_debt(&debt, today(), 1000), &Settings::default());
        assert!(output.contains("58"));
        assert!(output.contains("Total interest"));
    }

    #[test]
    fn test_portfolio_never_debt_free_with_unpayable() {
        let debts = vec![
            Debt::new("Loan", Money::from_dollars(1000), 0.0, Money::from_dollars(100)),
            Debt::new("Card", Money::from_dollars(5000), 20.0, Money::from_dollars(50)),
        ];
        let summary = DebtPortfolioSummary::generate(&debts, today(), 1000);
        let output = format_portfolio(&summary, &Settings::default());
        assert!(output.contains("never"));
        assert!(output.contains("Debt free: never (1 debt(s)"));
    }
}
