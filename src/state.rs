//! Planner state
//!
//! One explicit snapshot of everything the planner knows. State changes are
//! methods that take `&self` and return a new snapshot, so the engine never
//! sees shared mutable data and every view can be recomputed from scratch.

use chrono::NaiveDate;
use tracing::info;

use crate::clock::Clock;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    AssetLoan, BudgetCategory, BudgetConfig, Debt, Money, MonthKey, OneTimeBill, PaySchedule,
    PlannerFlag, RecurringBill, SourceKind, TransactionLike,
};
use crate::reports::BudgetActualsReport;
use crate::services::assignment::{plan_assignment, AssignmentOptions, BillSet, PaycheckAssignment};
use crate::services::pay_schedule::paychecks_in_month;
use crate::services::recurrence;

/// A bill looked up by id or name
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BillRef<'a> {
    Recurring(&'a RecurringBill),
    OneTime(&'a OneTimeBill),
}

impl BillRef<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Recurring(bill) => &bill.name,
            Self::OneTime(bill) => &bill.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerState {
    pub pay_schedule: Option<PaySchedule>,
    pub bills: Vec<RecurringBill>,
    pub one_time_bills: Vec<OneTimeBill>,
    pub assets: Vec<AssetLoan>,
    pub debts: Vec<Debt>,
    pub budget: BudgetConfig,
    pub transactions: Vec<TransactionLike>,
    /// Data-quality flags raised while loading; never persisted
    pub flags: Vec<PlannerFlag>,
}

impl PlannerState {
    pub fn bill_set(&self) -> BillSet<'_> {
        BillSet {
            recurring: &self.bills,
            assets: &self.assets,
            one_time: &self.one_time_bills,
        }
    }

    /// Find a recurring or one-time bill by short id or case-insensitive name
    pub fn find_bill(&self, query: &str) -> PlannerResult<BillRef<'_>> {
        let query = query.trim();
        if let Some(bill) = self
            .bills
            .iter()
            .find(|b| b.id.matches_short(query) || b.name.eq_ignore_ascii_case(query))
        {
            return Ok(BillRef::Recurring(bill));
        }
        self.one_time_bills
            .iter()
            .find(|b| b.id.matches_short(query) || b.name.eq_ignore_ascii_case(query))
            .map(BillRef::OneTime)
            .ok_or_else(|| PlannerError::bill_not_found(query))
    }

    pub fn find_asset(&self, query: &str) -> PlannerResult<&AssetLoan> {
        let query = query.trim();
        self.assets
            .iter()
            .find(|a| a.id.matches_short(query) || a.name.eq_ignore_ascii_case(query))
            .ok_or_else(|| PlannerError::loan_not_found(query))
    }

    pub fn find_debt(&self, query: &str) -> PlannerResult<&Debt> {
        let query = query.trim();
        self.debts
            .iter()
            .find(|d| d.id.matches_short(query) || d.name.eq_ignore_ascii_case(query))
            .ok_or_else(|| PlannerError::debt_not_found(query))
    }

    pub fn with_pay_schedule(&self, schedule: PaySchedule) -> Self {
        Self {
            pay_schedule: Some(schedule),
            ..self.clone()
        }
    }

    pub fn with_bill(&self, bill: RecurringBill) -> Self {
        let mut next = self.clone();
        next.bills.push(bill);
        next
    }

    pub fn with_one_time_bill(&self, bill: OneTimeBill) -> Self {
        let mut next = self.clone();
        next.one_time_bills.push(bill);
        next
    }

    pub fn with_asset(&self, asset: AssetLoan) -> Self {
        let mut next = self.clone();
        next.assets.push(asset);
        next
    }

    pub fn with_debt(&self, debt: Debt) -> Self {
        let mut next = self.clone();
        next.debts.push(debt);
        next
    }

    pub fn with_transaction(&self, transaction: TransactionLike) -> Self {
        let mut next = self.clone();
        next.transactions.push(transaction);
        next
    }

    /// Toggle a bill's paid state
    ///
    /// Recurring bills advance to their next period; one-time bills only
    /// flip `paid`.
    pub fn toggle_bill(&self, query: &str, today: NaiveDate) -> PlannerResult<Self> {
        let mut next = self.clone();
        match self.find_bill(query)? {
            BillRef::Recurring(bill) => {
                let toggled = recurrence::toggle_paid(bill, today);
                info!(bill = %bill.name, next_due = ?toggled.next_due_date, "toggled recurring bill");
                replace_by_id(&mut next.bills, toggled, |b| b.id);
            }
            BillRef::OneTime(bill) => {
                let toggled = bill.toggle_paid(today);
                info!(bill = %bill.name, paid = toggled.paid, "toggled one-time bill");
                replace_by_id(&mut next.one_time_bills, toggled, |b| b.id);
            }
        }
        Ok(next)
    }

    /// Pay a recurring bill with the amount actually charged
    pub fn pay_bill(
        &self,
        query: &str,
        amount: Money,
        today: NaiveDate,
        history_cap: usize,
    ) -> PlannerResult<Self> {
        let bill = match self.find_bill(query)? {
            BillRef::Recurring(bill) => bill,
            BillRef::OneTime(bill) => {
                return Err(PlannerError::Validation(format!(
                    "'{}' is a one-time bill; toggle it instead",
                    bill.name
                )))
            }
        };
        let paid = recurrence::pay_with_amount(bill, today, amount, history_cap);
        let mut next = self.clone();
        replace_by_id(&mut next.bills, paid, |b| b.id);
        Ok(next)
    }

    /// Drop one entry from a recurring bill's payment history
    pub fn remove_bill_payment(&self, query: &str, index: usize) -> PlannerResult<Self> {
        let BillRef::Recurring(bill) = self.find_bill(query)? else {
            return Err(PlannerError::Validation(format!(
                "'{}' has no payment history",
                query
            )));
        };
        let mut updated = bill.clone();
        if updated.remove_payment(index).is_none() {
            return Err(PlannerError::Validation(format!(
                "'{}' has no payment #{}",
                bill.name,
                index + 1
            )));
        }
        let mut next = self.clone();
        replace_by_id(&mut next.bills, updated, |b| b.id);
        Ok(next)
    }

    /// Set a category cap, either the default or one month's override
    pub fn set_budget_cap(&self, category: BudgetCategory, amount: Money, month: Option<MonthKey>) -> Self {
        let mut next = self.clone();
        match month {
            Some(month) => next.budget.upsert_month_cap(month, category, amount),
            None => next.budget.set_default_cap(category, amount),
        }
        next
    }

    /// Fill in a first due date for every bill that has none
    pub fn with_resolved_due_dates(&self, today: NaiveDate) -> Self {
        let mut next = self.clone();
        next.bills = self
            .bills
            .iter()
            .map(|bill| recurrence::ensure_next_due(bill, today))
            .collect();
        next
    }

    pub fn assignment(&self, clock: &dyn Clock, options: &AssignmentOptions) -> PaycheckAssignment {
        plan_assignment(self.pay_schedule.as_ref(), self.bill_set(), clock, options)
    }

    /// Spending records for the budget report
    ///
    /// Recorded transactions plus bill payments: each entry of a recurring
    /// bill's history and every paid one-time bill.
    ///
    /// History entries are keyed `<bill id>@<date>`, with a `#n` suffix for
    /// the nth payment on the same date, so ids survive the history cap
    /// dropping older payments.
    pub fn spending_records(&self) -> Vec<TransactionLike> {
        let history = self.bills.iter().flat_map(|bill| {
            let payments = &bill.historical_payments;
            payments.iter().enumerate().map(move |(i, payment)| {
                let same_day = payments[..i].iter().filter(|p| p.date == payment.date).count();
                let id = if same_day == 0 {
                    format!("{}@{}", bill.id, payment.date)
                } else {
                    format!("{}@{}#{}", bill.id, payment.date, same_day + 1)
                };
                TransactionLike::new(
                    id,
                    payment.date,
                    bill.category.as_str(),
                    payment.amount,
                    SourceKind::Bill,
                )
                .with_name(bill.name.clone())
            })
        });

        let one_time = self.one_time_bills.iter().filter_map(|bill| {
            let paid_on = bill.paid_date.filter(|_| bill.paid)?;
            Some(
                TransactionLike::new(
                    bill.id.to_string(),
                    paid_on,
                    bill.category.as_str(),
                    bill.amount,
                    SourceKind::Bill,
                )
                .with_name(bill.name.clone()),
            )
        });

        self.transactions
            .iter()
            .cloned()
            .chain(history)
            .chain(one_time)
            .collect()
    }

    pub fn budget_actuals(&self, month: MonthKey) -> BudgetActualsReport {
        let paychecks = self
            .pay_schedule
            .as_ref()
            .map(|schedule| paychecks_in_month(schedule, month))
            .unwrap_or_default();
        BudgetActualsReport::generate(&self.budget, month, &self.spending_records(), &paychecks)
    }
}

fn replace_by_id<T, K: PartialEq>(items: &mut [T], replacement: T, key: impl Fn(&T) -> K) {
    let id = key(&replacement);
    if let Some(slot) = items.iter_mut().find(|item| key(item) == id) {
        *slot = replacement;
    }
}
