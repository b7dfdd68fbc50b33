//! Scheduling and projection engine
//!
//! Pure calculations over model snapshots. Nothing here reads files or the
//! system clock; "today" always arrives through a [`crate::clock::Clock`] or
//! an explicit date argument.

pub mod amortization;
pub mod assignment;
pub mod date_cursor;
pub mod pay_schedule;
pub mod payoff;
pub mod recurrence;

pub use amortization::{amortize, amortize_asset, AmortizationRow, AmortizationSchedule, LoanTerms};
pub use assignment::{
    assign_bills, plan_assignment, project_bills, AssignedBill, AssignmentOptions, BillSet,
    BillSource, Check, PaycheckAssignment,
};
pub use pay_schedule::{generate_paychecks, next_two_paychecks, paychecks_in_month};
pub use payoff::{project_debt, DebtPortfolioSummary, PayoffOutcome, PayoffProjection};
