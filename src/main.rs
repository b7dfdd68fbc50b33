use anyhow::Result;
use clap::{Parser, Subcommand};
use chrono::NaiveDate;

use bill_planner::cli::{
    handle_assign_command, handle_bill_command, handle_budget_command, handle_config_command,
    handle_debt_command, handle_export_command, handle_loan_command, handle_schedule_command,
};
use bill_planner::clock::{Clock, FixedClock, SystemClock};
use bill_planner::config::{PlannerPaths, Settings};
use bill_planner::logging::init_tracing;
use bill_planner::storage::Storage;

#[derive(Parser)]
#[command(
    name = "billplan",
    version,
    about = "Paycheck-aware bill planner",
    long_about = "Bill Planner tracks your pay schedule and bills, splits upcoming bills \
                  across your next two paychecks, and projects loan and debt payoff."
)]
struct Cli {
    /// Plan as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the planner data directory
    Init,

    /// Show or change configuration
    #[command(subcommand)]
    Config(bill_planner::cli::ConfigCommands),

    /// Pay schedule commands
    #[command(subcommand)]
    Schedule(bill_planner::cli::ScheduleCommands),

    /// Split upcoming bills across the next two paychecks
    Assign,

    /// Bill management commands
    #[command(subcommand)]
    Bill(bill_planner::cli::BillCommands),

    /// Asset loan commands
    #[command(subcommand)]
    Loan(bill_planner::cli::LoanCommands),

    /// Debt payoff commands
    #[command(subcommand)]
    Debt(bill_planner::cli::DebtCommands),

    /// Budget caps and actuals
    #[command(subcommand)]
    Budget(bill_planner::cli::BudgetCommands),

    /// Export upcoming bills
    Export(bill_planner::cli::ExportArgs),
}

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let clock: Box<dyn Clock> = match cli.today {
        Some(date) => Box::new(FixedClock::new(date)),
        None => Box::new(SystemClock),
    };

    // Initialize paths and settings
    let paths = PlannerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Bill Planner is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing Bill Planner at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            if !storage.has_state() {
                storage.save(&storage.load(clock.today())?)?;
            }
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  billplan schedule set biweekly 2000 --next 2024-01-05");
            println!("  billplan bill add Rent 1200 --due-day 1 --autopay");
            println!("  billplan assign");
        }
        Some(Commands::Config(cmd)) => handle_config_command(&paths, &settings, cmd)?,
        Some(Commands::Schedule(cmd)) => handle_schedule_command(&storage, &settings, clock.as_ref(), cmd)?,
        Some(Commands::Assign) => handle_assign_command(&storage, &settings, clock.as_ref())?,
        Some(Commands::Bill(cmd)) => handle_bill_command(&storage, &settings, clock.as_ref(), cmd)?,
        Some(Commands::Loan(cmd)) => handle_loan_command(&storage, &settings, clock.as_ref(), cmd)?,
        Some(Commands::Debt(cmd)) => handle_debt_command(&storage, &settings, clock.as_ref(), cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, clock.as_ref(), cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, &settings, clock.as_ref(), args)?,
        None => {
            println!("Bill Planner - paycheck-aware bill planning");
            println!();
            println!("Run 'billplan --help' for usage information.");
        }
    }

    Ok(())
}
