//! Asset loan commands

use clap::Subcommand;
use std::fs::File;
use std::path::PathBuf;

use super::{parse_date, parse_frequency, parse_money, parse_rate};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_amortization, format_date, format_percentage};
use crate::error::PlannerResult;
use crate::export::write_amortization_csv;
use crate::models::AssetLoan;
use crate::services::amortization::amortize_asset;
use crate::storage::Storage;

/// Loan subcommands
#[derive(Subcommand)]
pub enum LoanCommands {
    /// Add a loan financed against an asset
    Add {
        /// Loan name
        name: String,
        /// Original loan amount
        amount: String,
        /// Annual interest rate in percent (e.g., "6.5")
        rate: String,
        /// Payment per period
        payment: String,
        /// First payment date (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,
        /// Payment frequency
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// Current outstanding balance, if different from the loan amount
        #[arg(short, long)]
        balance: Option<String>,
    },

    /// List loans
    List,

    /// Show a loan's amortization schedule
    Schedule {
        /// Loan name or ID
        loan: String,
        /// Write the schedule to a CSV file instead of the terminal
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

/// Handle a loan command
pub fn handle_loan_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: LoanCommands,
) -> PlannerResult<()> {
    let state = storage.load(clock.today())?;

    match cmd {
        LoanCommands::Add {
            name,
            amount,
            rate,
            payment,
            start,
            frequency,
            balance,
        } => {
            let frequency = parse_frequency(&frequency, |_| true)?;
            let mut loan = AssetLoan::new(
                name,
                parse_money(&amount)?.non_negative(),
                parse_rate(&rate)?,
                parse_money(&payment)?.non_negative(),
                frequency,
                parse_date(&start)?,
            );
            if let Some(balance) = balance {
                loan = loan.with_current_balance(parse_money(&balance)?.non_negative());
            }
            println!(
                "Added loan: {} ({} every {} period)",
                loan.name,
                settings.format_money(loan.payment_amount),
                loan.payment_frequency
            );
            storage.save(&state.with_asset(loan))?;
        }

        LoanCommands::List => {
            if state.assets.is_empty() {
                println!("No loans found.");
            }
            for loan in &state.assets {
                let schedule = amortize_asset(loan, settings.effective_iteration_cap());
                let payoff = schedule
                    .payoff_date()
                    .map(|d| format_date(d, settings))
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "{:<24} {:>12} {:>8} {:>7}  paid off {}",
                    loan.name,
                    settings.format_money(loan.principal()),
                    format!("{:.2}%", loan.interest_rate),
                    format_percentage(loan.progress_percent()),
                    payoff
                );
            }
        }

        LoanCommands::Schedule { loan, csv } => {
            let loan = state.find_asset(&loan)?;
            let schedule = amortize_asset(loan, settings.effective_iteration_cap());
            match csv {
                Some(path) => {
                    let file = File::create(&path)?;
                    write_amortization_csv(&schedule, file)?;
                    println!(
                        "Wrote {} period(s) for '{}' to {}",
                        schedule.rows.len(),
                        loan.name,
                        path.display()
                    );
                }
                None => print!("{}", format_amortization(&loan.name, &schedule, settings)),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_frequency_accepted_for_loans() {
        for name in ["weekly", "semimonthly", "annual"] {
            assert!(parse_frequency(name, |_| true).is_ok());
        }
    }
}
