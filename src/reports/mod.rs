//! Reports module
//!
//! Month-level summaries built from the planner state.

pub mod budget_actuals;

pub use budget_actuals::{BudgetActualsReport, CategoryActuals};
