//! Storage layer
//!
//! The whole planner state lives in one JSON document written atomically.
//! Loading goes through [`records::normalize`], so a damaged or hand-edited
//! file still loads, with flags describing what was repaired.

pub mod file_io;
pub mod records;

pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use records::{normalize, StateRecord};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::paths::PlannerPaths;
use crate::error::PlannerError;
use crate::state::PlannerState;

pub struct Storage {
    paths: PlannerPaths,
}

impl Storage {
    pub fn new(paths: PlannerPaths) -> Result<Self, PlannerError> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &PlannerPaths {
        &self.paths
    }

    /// Load the state, filling missing dates from `today`
    ///
    /// A missing state file is an empty planner, not an error.
    pub fn load(&self, today: NaiveDate) -> Result<PlannerState, PlannerError> {
        let path = self.paths.state_file();
        let record: StateRecord = read_json(&path)?;
        let state = normalize(record, today);
        debug!(
            path = %path.display(),
            bills = state.bills.len(),
            flags = state.flags.len(),
            "loaded planner state"
        );
        Ok(state)
    }

    pub fn save(&self, state: &PlannerState) -> Result<(), PlannerError> {
        let path = self.paths.state_file();
        write_json_atomic(&path, &StateRecord::from(state))?;
        info!(path = %path.display(), "saved planner state");
        Ok(())
    }

    pub fn has_state(&self) -> bool {
        self.paths.state_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PaySchedule, RecurringBill};
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_missing_state_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(PlannerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.has_state());
        assert_eq!(storage.load(today()).unwrap(), PlannerState::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(PlannerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let state = PlannerState::default()
            .with_pay_schedule(PaySchedule::monthly(Money::from_dollars(4000), 28))
            .with_bill(RecurringBill::monthly("Rent", Money::from_dollars(1500), 1));
        storage.save(&state).unwrap();

        assert!(storage.has_state());
        assert_eq!(storage.load(today()).unwrap(), state);
    }
}
