//! Configuration commands

use clap::Subcommand;

use crate::config::paths::PlannerPaths;
use crate::config::settings::Settings;
use crate::error::PlannerResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,

    /// Change a setting
    Set {
        /// Setting name (e.g., balance_threshold, history_cap)
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(paths: &PlannerPaths, settings: &Settings, cmd: ConfigCommands) -> PlannerResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Bill Planner Configuration");
            println!("==========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("State file:       {}", paths.state_file().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol:     {}", settings.currency_symbol);
            println!("  date_format:         {}", settings.date_format);
            println!("  balance_threshold:   {}", settings.format_money(settings.balance_threshold));
            println!("  history_cap:         {}", settings.history_cap);
            println!("  iteration_cap:       {}", settings.iteration_cap);
            println!("  paycheck_count:      {}", settings.paycheck_count);
            println!("  export_horizon_days: {}", settings.export_horizon_days);
        }
        ConfigCommands::Set { key, value } => {
            let mut updated = settings.clone();
            updated.set(&key, &value)?;
            updated.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }
    Ok(())
}
