//! User settings for the bill planner
//!
//! Display preferences plus the tunables the engine reads: the balancing
//! threshold, the payment history cap and the simulation iteration cap.

use serde::{Deserialize, Serialize};

use super::paths::PlannerPaths;
use crate::error::PlannerError;
use crate::models::{Money, DEFAULT_HISTORY_CAP};
use crate::services::amortization::DEFAULT_ITERATION_CAP;
use crate::services::assignment::{AssignmentOptions, DEFAULT_BALANCE_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Leftover gap that triggers the paycheck balancing pass
    #[serde(default = "default_balance_threshold")]
    pub balance_threshold: Money,

    /// Payments kept per variable bill
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Periods simulated before an amortization or payoff gives up
    #[serde(default = "default_iteration_cap")]
    pub iteration_cap: u32,

    /// Paychecks listed by `billplan paychecks`
    #[serde(default = "default_paycheck_count")]
    pub paycheck_count: usize,

    /// Days ahead covered by bill exports
    #[serde(default = "default_export_horizon_days")]
    pub export_horizon_days: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_balance_threshold() -> Money {
    DEFAULT_BALANCE_THRESHOLD
}

fn default_history_cap() -> usize {
    DEFAULT_HISTORY_CAP
}

fn default_iteration_cap() -> u32 {
    DEFAULT_ITERATION_CAP
}

fn default_paycheck_count() -> usize {
    6
}

fn default_export_horizon_days() -> u32 {
    90
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            balance_threshold: default_balance_threshold(),
            history_cap: default_history_cap(),
            iteration_cap: default_iteration_cap(),
            paycheck_count: default_paycheck_count(),
            export_horizon_days: default_export_horizon_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &PlannerPaths) -> Result<Self, PlannerError> {
        let settings_path = paths.settings_file();
        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PlannerError::Io(format!("Failed to read settings file: {}", e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| PlannerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    pub fn save(&self, paths: &PlannerPaths) -> Result<(), PlannerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PlannerError::Config(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PlannerError::Io(format!("Failed to write settings file: {}", e)))?;
        Ok(())
    }

    pub fn assignment_options(&self) -> AssignmentOptions {
        AssignmentOptions {
            balance_threshold: self.balance_threshold.non_negative(),
        }
    }

    /// Iteration cap, never below one period
    pub fn effective_iteration_cap(&self) -> u32 {
        self.iteration_cap.max(1)
    }

    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Update one setting from its key and a string value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PlannerError> {
        let invalid = |e: &dyn std::fmt::Display| {
            PlannerError::Validation(format!("Invalid value '{}' for {}: {}", value, key, e))
        };
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => self.date_format = value.to_string(),
            "balance_threshold" => {
                self.balance_threshold = Money::parse(value).map_err(|e| invalid(&e))?.non_negative()
            }
            "history_cap" => self.history_cap = value.parse().map_err(|e| invalid(&e))?,
            "iteration_cap" => self.iteration_cap = value.parse().map_err(|e| invalid(&e))?,
            "paycheck_count" => self.paycheck_count = value.parse().map_err(|e| invalid(&e))?,
            "export_horizon_days" => {
                self.export_horizon_days = value.parse().map_err(|e| invalid(&e))?
            }
            _ => return Err(PlannerError::Validation(format!("Unknown setting: {}", key))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.balance_threshold, Money::from_dollars(200));
        assert_eq!(settings.history_cap, 12);
        assert_eq!(settings.iteration_cap, 1000);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.balance_threshold = Money::from_dollars(150);
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "£"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.iteration_cap, 1000);
        assert_eq!(settings.export_horizon_days, 90);
    }

    #[test]
    fn test_set_by_key() {
        let mut settings = Settings::default();
        settings.set("balance_threshold", "$75.50").unwrap();
        assert_eq!(settings.balance_threshold, Money::from_cents(7_550));
        settings.set("history_cap", "6").unwrap();
        assert_eq!(settings.history_cap, 6);

        assert!(settings.set("history_cap", "many").unwrap_err().is_validation());
        assert!(settings.set("colour", "red").is_err());
    }
}
