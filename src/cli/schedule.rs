//! Pay schedule and paycheck assignment commands

use clap::Subcommand;
use tracing::info;

use super::{parse_date, parse_frequency, parse_money};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_assignment, format_flags, format_paychecks};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{Frequency, PaySchedule};
use crate::services::pay_schedule::generate_paychecks;
use crate::storage::Storage;

/// Pay schedule subcommands
#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// Set the pay schedule
    Set {
        /// weekly, biweekly, semimonthly or monthly
        frequency: String,
        /// Amount of each paycheck
        amount: String,
        /// Next known pay date for weekly and biweekly schedules (YYYY-MM-DD)
        #[arg(short, long)]
        next: Option<String>,
        /// Semimonthly pay days, e.g. "1,15"
        #[arg(long)]
        days: Option<String>,
        /// Day of month for monthly schedules
        #[arg(long)]
        day: Option<u32>,
    },

    /// Show upcoming paychecks
    Show {
        /// Number of paychecks to list
        #[arg(short, long)]
        count: Option<usize>,
    },
}

/// Handle a pay schedule command
pub fn handle_schedule_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: ScheduleCommands,
) -> PlannerResult<()> {
    let today = clock.today();
    let state = storage.load(today)?;

    match cmd {
        ScheduleCommands::Set {
            frequency,
            amount,
            next,
            days,
            day,
        } => {
            let frequency = parse_frequency(&frequency, Frequency::is_pay_frequency)?;
            let amount = parse_money(&amount)?.non_negative();
            let schedule = match frequency {
                Frequency::Weekly | Frequency::Biweekly => {
                    let next_pay_date = match next {
                        Some(date) => parse_date(&date)?,
                        None => {
                            return Err(PlannerError::Validation(format!(
                                "A {} schedule needs --next YYYY-MM-DD",
                                frequency
                            )))
                        }
                    };
                    if frequency == Frequency::Weekly {
                        PaySchedule::weekly(amount, next_pay_date)
                    } else {
                        PaySchedule::biweekly(amount, next_pay_date)
                    }
                }
                Frequency::Semimonthly => {
                    let anchors = days.as_deref().map(parse_anchor_days).transpose()?;
                    PaySchedule::semimonthly(amount, anchors)
                }
                _ => PaySchedule::monthly(amount, day.unwrap_or(1).clamp(1, 31)),
            };

            let updated = state.with_pay_schedule(schedule);
            storage.save(&updated)?;
            info!(%frequency, %amount, "pay schedule updated");
            println!("Pay schedule set: {} {}", frequency, settings.format_money(amount));
        }

        ScheduleCommands::Show { count } => {
            let count = count.unwrap_or(settings.paycheck_count);
            let events = state
                .pay_schedule
                .as_ref()
                .map(|schedule| generate_paychecks(schedule, count, today))
                .unwrap_or_default();
            println!("{}", format_paychecks(&events, settings));
            print!("{}", format_flags(&state.flags));
        }
    }

    Ok(())
}

/// Show how bills split across the next two paychecks
pub fn handle_assign_command(storage: &Storage, settings: &Settings, clock: &dyn Clock) -> PlannerResult<()> {
    let state = storage.load(clock.today())?;
    let assignment = state.assignment(clock, &settings.assignment_options());
    print!("{}", format_assignment(&assignment, settings));
    print!("{}", format_flags(&state.flags));
    Ok(())
}

fn parse_anchor_days(input: &str) -> PlannerResult<[u32; 2]> {
    let days: Vec<u32> = input
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| PlannerError::Validation(format!("Invalid pay days: {}", input)))?;
    match days.as_slice() {
        [a, b] if (1..=31).contains(a) && (1..=31).contains(b) && a != b => Ok([*a, *b]),
        _ => Err(PlannerError::Validation(format!(
            "Semimonthly pay days must be two distinct days between 1 and 31, got '{}'",
            input
        ))),
    }
}
