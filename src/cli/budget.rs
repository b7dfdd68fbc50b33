//! Budget CLI commands
//!
//! Category caps, recorded spending and the monthly budget-vs-actual report.

use clap::Subcommand;
use uuid::Uuid;

use super::{parse_category, parse_date, parse_money, parse_month};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::format_flags;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{MonthKey, SourceKind, TransactionLike};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show budget vs actual spending for a month
    Show {
        /// Month (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set a category cap
    SetCap {
        /// Category name
        category: String,
        /// Cap amount
        amount: String,
        /// Only for this month (YYYY-MM); otherwise the default cap
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Record a spending transaction
    Record {
        /// Amount (negative for a credit)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category label
        category: String,
        /// Transaction date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short, long)]
        name: Option<String>,
        /// Source type label, e.g. "transfer" or "debit"
        #[arg(short, long)]
        kind: Option<String>,
        /// Record came from a bank sync instead of a receipt
        #[arg(long)]
        synced: bool,
    },

    /// Keep one transaction out of the actuals
    Exclude {
        /// Transaction ID
        id: String,
    },

    /// Turn the transfer and refund exclusion rules on or off
    Rules {
        #[arg(long)]
        transfers: Option<bool>,
        #[arg(long)]
        refunds: Option<bool>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: BudgetCommands,
) -> PlannerResult<()> {
    let today = clock.today();
    let state = storage.load(today)?;

    match cmd {
        BudgetCommands::Show { month } => {
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => MonthKey::of(today),
            };
            let report = state.budget_actuals(month);
            print!("{}", report.format_terminal());
            for row in report.over_budget() {
                println!(
                    "Over budget: {} by {}",
                    row.category,
                    settings.format_money(-row.remaining)
                );
            }
            print!("{}", format_flags(&state.flags));
        }

        BudgetCommands::SetCap {
            category,
            amount,
            month,
        } => {
            let category = parse_category(&category)?;
            let amount = parse_money(&amount)?;
            if amount.is_negative() {
                return Err(PlannerError::Validation("A cap cannot be negative".into()));
            }
            let month = month.as_deref().map(parse_month).transpose()?;
            storage.save(&state.set_budget_cap(category, amount, month))?;
            match month {
                Some(m) => println!("Set {} cap for {} to {}", category, m, settings.format_money(amount)),
                None => println!("Set default {} cap to {}", category, settings.format_money(amount)),
            }
        }

        BudgetCommands::Record {
            amount,
            category,
            date,
            name,
            kind,
            synced,
        } => {
            let date = date.as_deref().map(parse_date).transpose()?.unwrap_or(today);
            let source = if synced { SourceKind::Synced } else { SourceKind::Receipt };
            let mut txn = TransactionLike::new(
                Uuid::new_v4().to_string(),
                date,
                category,
                parse_money(&amount)?,
                source,
            );
            if let Some(name) = name {
                txn = txn.with_name(name);
            }
            if let Some(kind) = kind {
                txn = txn.with_kind(kind);
            }
            println!("Recorded {} in {} ({})", settings.format_money(txn.amount), txn.category, txn.id);
            storage.save(&state.with_transaction(txn))?;
        }

        BudgetCommands::Exclude { id } => {
            if !state.transactions.iter().any(|t| t.id == id) {
                return Err(PlannerError::NotFound {
                    entity_type: "Transaction",
                    identifier: id,
                });
            }
            let mut updated = state.clone();
            if updated.budget.exclude_id(id.clone()) {
                storage.save(&updated)?;
                println!("Excluded transaction {}", id);
            } else {
                println!("Transaction {} was already excluded", id);
            }
        }

        BudgetCommands::Rules { transfers, refunds } => {
            let mut updated = state.clone();
            if let Some(on) = transfers {
                updated.budget.exclusions.exclude_transfers = on;
            }
            if let Some(on) = refunds {
                updated.budget.exclusions.exclude_refunds = on;
            }
            storage.save(&updated)?;
            println!(
                "Exclude transfers: {}, exclude refunds: {}",
                updated.budget.exclusions.exclude_transfers, updated.budget.exclusions.exclude_refunds
            );
        }
    }

    Ok(())
}
