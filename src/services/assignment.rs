//! Paycheck assignment
//!
//! Splits every active bill between the next two paychecks. A bill goes to
//! the paycheck that arrives before it is due; a single greedy balancing
//! pass then evens out the two leftovers when they drift too far apart.
//!
//! The balancing pass moves at most one bill per computation. It is a
//! heuristic, not an optimizer: the result is stable and easy to predict,
//! which matters more to the person reading the plan than a perfect split.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use super::date_cursor::next_on_or_after;
use super::pay_schedule::next_two_paychecks;
use super::recurrence::project_into_window;
use crate::clock::Clock;
use crate::models::{
    AssetId, AssetLoan, AssignmentPreference, BillId, BudgetCategory, Money, OneTimeBill,
    OneTimeBillId, PaySchedule, PaycheckEvent, RecurringBill,
};

/// Leftover gap above which the balancing pass kicks in
pub const DEFAULT_BALANCE_THRESHOLD: Money = Money::from_dollars(200);

/// Tunables for [`assign_bills`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentOptions {
    pub balance_threshold: Money,
}

impl Default for AssignmentOptions {
    fn default() -> Self {
        Self {
            balance_threshold: DEFAULT_BALANCE_THRESHOLD,
        }
    }
}

/// Which of the two upcoming paychecks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Check {
    Check1,
    Check2,
}

impl Check {
    pub fn other(&self) -> Self {
        match self {
            Self::Check1 => Self::Check2,
            Self::Check2 => Self::Check1,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check1 => write!(f, "check 1"),
            Self::Check2 => write!(f, "check 2"),
        }
    }
}

/// The record a planned bill came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum BillSource {
    Recurring(BillId),
    AssetPayment(AssetId),
    OneTime(OneTimeBillId),
}

/// A bill instance annotated with its effective due date for this window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedBill {
    pub source: BillSource,
    pub name: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub category: BudgetCategory,
    pub autopay: bool,
    pub preference: AssignmentPreference,
}

impl AssignedBill {
    fn is_movable(&self, first_pay_day: u32) -> bool {
        !self.autopay
            && self.preference == AssignmentPreference::Auto
            && self.due_date.day() > first_pay_day
    }
}

/// The bill that the balancing pass moved, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalancingMove {
    pub name: String,
    pub from: Check,
    pub to: Check,
    pub difference_before: Money,
    pub difference_after: Money,
}

/// Bills split across the next two paychecks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct PaycheckAssignment {
    pub check1: Vec<AssignedBill>,
    pub check2: Vec<AssignedBill>,
    /// Dates of the two paychecks; empty when no pay schedule is configured
    pub pay_dates: Vec<NaiveDate>,
    pub pay_amounts: Vec<Money>,
    pub balancing_move: Option<BalancingMove>,
}

impl PaycheckAssignment {
    /// The assignment shown when no pay schedule exists
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pay_dates.is_empty()
    }

    pub fn bills(&self, check: Check) -> &[AssignedBill] {
        match check {
            Check::Check1 => &self.check1,
            Check::Check2 => &self.check2,
        }
    }

    pub fn total(&self, check: Check) -> Money {
        self.bills(check).iter().map(|b| b.amount).sum()
    }

    pub fn pay_amount(&self, check: Check) -> Money {
        let index = match check {
            Check::Check1 => 0,
            Check::Check2 => 1,
        };
        self.pay_amounts.get(index).copied().unwrap_or_default()
    }

    /// Paycheck amount minus the bills assigned to it
    pub fn leftover(&self, check: Check) -> Money {
        self.pay_amount(check) - self.total(check)
    }

    pub fn leftover_difference(&self) -> Money {
        (self.leftover(Check::Check1) - self.leftover(Check::Check2)).abs()
    }
}

/// The active bills for one assignment run
#[derive(Debug, Clone, Copy, Default)]
pub struct BillSet<'a> {
    pub recurring: &'a [RecurringBill],
    pub assets: &'a [AssetLoan],
    pub one_time: &'a [OneTimeBill],
}

/// Project every active bill to its effective due date for a window that
/// opens on `window_start`
///
/// Paid one-time bills and paid-off loans are not active and are skipped.
pub fn project_bills(bills: BillSet<'_>, window_start: NaiveDate) -> Vec<AssignedBill> {
    let recurring = bills.recurring.iter().map(|bill| AssignedBill {
        source: BillSource::Recurring(bill.id),
        name: bill.name.clone(),
        amount: bill.amount_estimate,
        due_date: project_into_window(bill, window_start),
        category: bill.category,
        autopay: bill.autopay,
        preference: bill.assignment_preference,
    });

    let assets = bills
        .assets
        .iter()
        .filter(|loan| loan.principal().is_positive())
        .map(|loan| AssignedBill {
            source: BillSource::AssetPayment(loan.id),
            name: loan.name.clone(),
            amount: loan.payment_amount,
            due_date: next_on_or_after(window_start, loan.payment_frequency, loan.start_date),
            category: BudgetCategory::Debt,
            autopay: false,
            preference: AssignmentPreference::Auto,
        });

    let one_time = bills.one_time.iter().filter(|bill| !bill.paid).map(|bill| AssignedBill {
        source: BillSource::OneTime(bill.id),
        name: bill.name.clone(),
        amount: bill.amount,
        due_date: bill.due_date,
        category: bill.category,
        autopay: false,
        preference: AssignmentPreference::Auto,
    });

    recurring.chain(assets).chain(one_time).collect()
}

/// Assign projected bills to two paychecks and balance the leftovers once
pub fn assign_bills(
    paychecks: [PaycheckEvent; 2],
    bills: Vec<AssignedBill>,
    options: &AssignmentOptions,
) -> PaycheckAssignment {
    let [first, second] = paychecks;
    let mut check1 = Vec::new();
    let mut check2 = Vec::new();

    for bill in bills {
        let target = match bill.preference {
            AssignmentPreference::Check1 => Check::Check1,
            AssignmentPreference::Check2 => Check::Check2,
            AssignmentPreference::Auto => {
                if first.date < bill.due_date && bill.due_date <= second.date {
                    Check::Check1
                } else {
                    Check::Check2
                }
            }
        };
        match target {
            Check::Check1 => check1.push(bill),
            Check::Check2 => check2.push(bill),
        }
    }

    let mut assignment = PaycheckAssignment {
        check1,
        check2,
        pay_dates: vec![first.date, second.date],
        pay_amounts: vec![first.amount, second.amount],
        balancing_move: None,
    };

    assignment.balancing_move = balance_once(&mut assignment, first.date.day(), options.balance_threshold);

    assignment.check1.sort_by_key(|b| b.due_date);
    assignment.check2.sort_by_key(|b| b.due_date);
    assignment
}

/// Build the assignment for the next two paychecks from `clock`'s today
///
/// Without a pay schedule the result is the empty assignment, not an error.
pub fn plan_assignment(
    schedule: Option<&PaySchedule>,
    bills: BillSet<'_>,
    clock: &dyn Clock,
    options: &AssignmentOptions,
) -> PaycheckAssignment {
    let Some(paychecks) = next_two_paychecks(schedule, clock) else {
        debug!("no pay schedule configured; returning empty assignment");
        return PaycheckAssignment::empty();
    };
    let projected = project_bills(bills, paychecks[0].date);
    assign_bills(paychecks, projected, options)
}

/// Move the single best candidate off the heavier paycheck, if that brings
/// the leftovers within `threshold` and strictly closer together
fn balance_once(
    assignment: &mut PaycheckAssignment,
    first_pay_day: u32,
    threshold: Money,
) -> Option<BalancingMove> {
    let leftover1 = assignment.leftover(Check::Check1);
    let leftover2 = assignment.leftover(Check::Check2);
    let before = (leftover1 - leftover2).abs();
    if before <= threshold {
        return None;
    }

    let (heavy, heavy_left, light_left) = if leftover1 < leftover2 {
        (Check::Check1, leftover1, leftover2)
    } else {
        (Check::Check2, leftover2, leftover1)
    };

    let mut best: Option<(usize, Money)> = None;
    for (index, bill) in assignment.bills(heavy).iter().enumerate() {
        if !bill.is_movable(first_pay_day) {
            continue;
        }
        let after = ((heavy_left + bill.amount) - (light_left - bill.amount)).abs();
        // Strict comparison keeps the first candidate on ties.
        if best.map_or(true, |(_, best_after)| after < best_after) {
            best = Some((index, after));
        }
    }

    let (index, after) = best?;
    if after > threshold || after >= before {
        debug!(%before, %after, "no balancing move improves the split enough");
        return None;
    }

    let light = heavy.other();
    let moved = match heavy {
        Check::Check1 => assignment.check1.remove(index),
        Check::Check2 => assignment.check2.remove(index),
    };
    info!(bill = %moved.name, from = %heavy, to = %light, %before, %after, "balanced paychecks");

    let record = BalancingMove {
        name: moved.name.clone(),
        from: heavy,
        to: light,
        difference_before: before,
        difference_after: after,
    };
    match light {
        Check::Check1 => assignment.check1.push(moved),
        Check::Check2 => assignment.check2.push(moved),
    }
    Some(record)
}
