//! Bill CLI commands
//!
//! Adding recurring and one-time bills, listing them, and recording
//! payments against them.

use clap::Subcommand;

use super::{parse_category, parse_date, parse_frequency, parse_money};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_bill_list, format_date, format_flags};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{AssignmentPreference, Frequency, OneTimeBill, RecurringBill};
use crate::state::BillRef;
use crate::storage::Storage;

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Add a recurring bill
    Add {
        /// Bill name
        name: String,
        /// Expected amount (e.g., "120" or "120.00")
        amount: String,
        /// Day of month the bill is due (clamped in short months)
        #[arg(short, long)]
        due_day: u32,
        /// weekly, biweekly, monthly, quarterly, biannual or annual
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// First month of the cycle (1-12) for quarterly and longer bills
        #[arg(long)]
        start_month: Option<u32>,
        /// Budget category
        #[arg(short, long)]
        category: Option<String>,
        /// The bill is paid automatically
        #[arg(long)]
        autopay: bool,
        /// The amount varies; the estimate follows recorded payments
        #[arg(long)]
        variable: bool,
        /// Preferred paycheck: auto, check1 or check2
        #[arg(long, default_value = "auto")]
        prefer: String,
    },

    /// Add a bill that is paid once
    AddOnce {
        /// Bill name
        name: String,
        /// Amount
        amount: String,
        /// Due date (YYYY-MM-DD)
        due_date: String,
        /// Budget category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List bills and loans
    List,

    /// Mark a bill paid (or a paid one-time bill unpaid)
    Toggle {
        /// Bill name or ID
        bill: String,
    },

    /// Pay a recurring bill with the amount actually charged
    Pay {
        /// Bill name or ID
        bill: String,
        /// Amount paid
        amount: String,
    },

    /// Show a bill's recorded payments
    History {
        /// Bill name or ID
        bill: String,
    },

    /// Remove a recorded payment by its number in `history`
    Unpay {
        /// Bill name or ID
        bill: String,
        /// Payment number as shown by `history`
        number: usize,
    },
}

/// Handle a bill command
pub fn handle_bill_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: BillCommands,
) -> PlannerResult<()> {
    let today = clock.today();
    let state = storage.load(today)?;

    match cmd {
        BillCommands::Add {
            name,
            amount,
            due_day,
            frequency,
            start_month,
            category,
            autopay,
            variable,
            prefer,
        } => {
            if !(1..=31).contains(&due_day) {
                return Err(PlannerError::Validation(format!(
                    "Due day must be between 1 and 31, got {}",
                    due_day
                )));
            }
            let frequency = parse_frequency(&frequency, Frequency::is_bill_frequency)?;
            let preference = AssignmentPreference::parse(&prefer)
                .ok_or_else(|| PlannerError::Validation(format!("Unknown preference: {}", prefer)))?;

            let mut bill = RecurringBill::new(name, parse_money(&amount)?, due_day, frequency)
                .with_autopay(autopay)
                .with_preference(preference);
            if let Some(month) = start_month {
                if !(1..=12).contains(&month) {
                    return Err(PlannerError::Validation(format!(
                        "Start month must be between 1 and 12, got {}",
                        month
                    )));
                }
                bill = bill.with_start_month(month);
            }
            if let Some(category) = category {
                bill = bill.with_category(parse_category(&category)?);
            }
            if variable {
                bill = bill.variable();
            }

            let updated = state.with_bill(bill).with_resolved_due_dates(today);
            storage.save(&updated)?;

            if let Some(added) = updated.bills.last() {
                println!("Added bill: {}", added.name);
                println!("  Estimate: {}", settings.format_money(added.amount_estimate));
                if let Some(next_due) = added.next_due_date {
                    println!("  Next due: {}", format_date(next_due, settings));
                }
                println!("  ID:       {}", added.id);
            }
        }

        BillCommands::AddOnce {
            name,
            amount,
            due_date,
            category,
        } => {
            let mut bill = OneTimeBill::new(name, parse_money(&amount)?, parse_date(&due_date)?);
            if let Some(category) = category {
                bill.category = parse_category(&category)?;
            }
            println!(
                "Added one-time bill: {} {} due {}",
                bill.name,
                settings.format_money(bill.amount),
                format_date(bill.due_date, settings)
            );
            storage.save(&state.with_one_time_bill(bill))?;
        }

        BillCommands::List => {
            println!("{}", format_bill_list(&state, today, settings));
            print!("{}", format_flags(&state.flags));
        }

        BillCommands::Toggle { bill } => {
            let updated = state.toggle_bill(&bill, today)?;
            match updated.find_bill(&bill)? {
                BillRef::Recurring(b) => match b.next_due_date {
                    Some(next_due) => println!(
                        "Marked '{}' paid. Next due {}",
                        b.name,
                        format_date(next_due, settings)
                    ),
                    None => println!("Marked '{}' paid.", b.name),
                },
                BillRef::OneTime(b) => println!(
                    "'{}' is now {}",
                    b.name,
                    if b.paid { "paid" } else { "unpaid" }
                ),
            }
            storage.save(&updated)?;
        }

        BillCommands::Pay { bill, amount } => {
            let amount = parse_money(&amount)?;
            let updated = state.pay_bill(&bill, amount, today, settings.history_cap)?;
            if let BillRef::Recurring(b) = updated.find_bill(&bill)? {
                println!("Recorded {} for '{}'", settings.format_money(amount), b.name);
                if b.variable {
                    println!("  New estimate: {}", settings.format_money(b.amount_estimate));
                }
            }
            storage.save(&updated)?;
        }

        BillCommands::History { bill } => match state.find_bill(&bill)? {
            BillRef::Recurring(b) => {
                if b.historical_payments.is_empty() {
                    println!("No payments recorded for '{}'.", b.name);
                } else {
                    println!("Payments for '{}':", b.name);
                    for (i, payment) in b.historical_payments.iter().enumerate() {
                        println!(
                            "  {:>2}. {}  {:>12}",
                            i + 1,
                            format_date(payment.date, settings),
                            settings.format_money(payment.amount)
                        );
                    }
                    if let Some(average) = b.historical_average() {
                        println!("  Average: {}", settings.format_money(average));
                    }
                }
            }
            BillRef::OneTime(b) => println!("'{}' is a one-time bill with no history.", b.name),
        },

        BillCommands::Unpay { bill, number } => {
            if number == 0 {
                return Err(PlannerError::Validation("Payment numbers start at 1".into()));
            }
            let updated = state.remove_bill_payment(&bill, number - 1)?;
            storage.save(&updated)?;
            println!("Removed payment #{} from '{}'", number, bill);
        }
    }

    Ok(())
}
