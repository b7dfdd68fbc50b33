//! Bill Planner - paycheck-aware bill planning from the terminal
//!
//! This library computes when money arrives and when it has to leave: pay
//! schedules, bill due dates, which paycheck covers which bill, loan
//! amortization, debt payoff projections and budget-vs-actual reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `clock`: Reference-date abstraction
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (pay schedules, bills, loans, debts, budgets)
//! - `services`: Scheduling, assignment and projection engine
//! - `reports`: Monthly budget actuals
//! - `state`: The planner snapshot and its transitions
//! - `storage`: JSON file storage with lenient loading
//! - `export`: CSV/JSON/YAML bill exports
//! - `display`, `cli`: Terminal formatting and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use bill_planner::clock::SystemClock;
//! use bill_planner::config::{PlannerPaths, Settings};
//! use bill_planner::storage::Storage;
//!
//! let paths = PlannerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let state = Storage::new(paths)?.load(chrono::Local::now().date_naive())?;
//! let plan = state.assignment(&SystemClock, &settings.assignment_options());
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{PlannerError, PlannerResult};
