//! Debt payoff commands

use clap::Subcommand;

use super::{parse_money, parse_rate};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_payoff, format_portfolio};
use crate::error::PlannerResult;
use crate::models::Debt;
use crate::services::payoff::{project_debt, DebtPortfolioSummary};
use crate::storage::Storage;

/// Debt subcommands
#[derive(Subcommand)]
pub enum DebtCommands {
    /// Track a debt
    Add {
        /// Debt name
        name: String,
        /// Current balance
        balance: String,
        /// Annual interest rate in percent
        rate: String,
        /// Monthly payment
        payment: String,
    },

    /// Project when one debt will be paid off
    Payoff {
        /// Debt name or ID
        debt: String,
    },

    /// Summarize every debt and the debt-free date
    Summary,
}

/// Handle a debt command
pub fn handle_debt_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: DebtCommands,
) -> PlannerResult<()> {
    let today = clock.today();
    let state = storage.load(today)?;

    match cmd {
        DebtCommands::Add {
            name,
            balance,
            rate,
            payment,
        } => {
            let debt = Debt::new(
                name,
                parse_money(&balance)?.non_negative(),
                parse_rate(&rate)?,
                parse_money(&payment)?.non_negative(),
            );
            println!("Added debt: {} ({})", debt.name, settings.format_money(debt.balance));
            storage.save(&state.with_debt(debt))?;
        }

        DebtCommands::Payoff { debt } => {
            let debt = state.find_debt(&debt)?;
            let outcome = project_debt(debt, today, settings.effective_iteration_cap());
            print!("{}", format_payoff(&debt.name, &outcome, settings));
        }

        DebtCommands::Summary => {
            let summary =
                DebtPortfolioSummary::generate(&state.debts, today, settings.effective_iteration_cap());
            println!("{}", format_portfolio(&summary, settings));
        }
    }

    Ok(())
}
