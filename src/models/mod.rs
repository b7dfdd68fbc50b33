//! Core data models for the bill planner
//!
//! Plain records for pay schedules, bills, loans, debts and budgets. The
//! calculations over them live in `services` and `reports`.

pub mod asset;
pub mod bill;
pub mod budget;
pub mod category;
pub mod debt;
pub mod flags;
pub mod frequency;
pub mod ids;
pub mod money;
pub mod month;
pub mod pay_schedule;
pub mod transaction;

pub use asset::AssetLoan;
pub use bill::{AssignmentPreference, HistoricalPayment, OneTimeBill, RecurringBill, DEFAULT_HISTORY_CAP};
pub use budget::{BudgetConfig, BudgetExclusions, CategoryCaps};
pub use category::BudgetCategory;
pub use debt::Debt;
pub use flags::PlannerFlag;
pub use frequency::Frequency;
pub use ids::{AssetId, BillId, DebtId, OneTimeBillId};
pub use money::Money;
pub use month::MonthKey;
pub use pay_schedule::{PayCadence, PaySchedule, PaycheckEvent};
pub use transaction::{SourceKind, TransactionLike};
