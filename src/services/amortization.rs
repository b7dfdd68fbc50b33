//! Loan amortization
//!
//! Builds a level-payment schedule period by period. Every value is rounded
//! to the cent as it is produced, so the running balance matches what a
//! lender statement would show.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use super::date_cursor::advance_period;
use crate::models::{AssetLoan, Frequency, Money, PlannerFlag};

/// Safety bound on simulated periods
pub const DEFAULT_ITERATION_CAP: u32 = 1000;

/// A balance at or below this is treated as paid off
const PAID_OFF_EPSILON: Money = Money::from_cents(1);

/// Everything the simulator needs to know about a loan
#[derive(Debug, Clone, PartialEq)]
pub struct LoanTerms {
    pub principal: Money,
    /// Annual rate in percent
    pub annual_rate: f64,
    pub payment: Money,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
}

impl LoanTerms {
    /// Terms for an asset loan, starting from its current balance when known
    pub fn from_asset(loan: &AssetLoan) -> Self {
        Self {
            principal: loan.principal(),
            annual_rate: loan.interest_rate,
            payment: loan.payment_amount,
            frequency: loan.payment_frequency,
            start_date: loan.start_date,
        }
    }

    pub fn periodic_rate(&self) -> f64 {
        periodic_rate(self.annual_rate, self.frequency)
    }
}

/// Annual percent rate spread over one payment period
pub fn periodic_rate(annual_rate: f64, frequency: Frequency) -> f64 {
    annual_rate / 100.0 / frequency.periods_per_year() as f64
}

/// One simulated period: interest accrued, principal repaid, new balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodStep {
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

impl PeriodStep {
    pub fn payment(&self) -> Money {
        self.interest + self.principal
    }
}

/// Apply one payment to `balance`
///
/// The principal portion never exceeds the balance, so the last payment is
/// only as large as it needs to be.
pub fn step_period(balance: Money, rate: f64, payment: Money) -> PeriodStep {
    let interest = balance.apply_rate(rate);
    let principal = (payment - interest).min(balance);
    PeriodStep {
        interest,
        principal,
        balance: balance - principal,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub date: NaiveDate,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
    /// Set when the iteration cap stopped the simulation early
    pub truncated: bool,
    pub flags: Vec<PlannerFlag>,
}

impl AmortizationSchedule {
    pub fn is_non_amortizing(&self) -> bool {
        self.flags.contains(&PlannerFlag::NonAmortizing)
    }

    pub fn total_interest(&self) -> Money {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.rows.iter().map(|r| r.payment).sum()
    }

    /// Date of the final payment, unless the schedule was cut short
    pub fn payoff_date(&self) -> Option<NaiveDate> {
        if self.truncated {
            return None;
        }
        self.rows.last().map(|r| r.date)
    }

    pub fn final_balance(&self) -> Option<Money> {
        self.rows.last().map(|r| r.balance)
    }
}

/// Simulate the full schedule for `terms`
///
/// A payment that never reduces the principal returns an empty schedule
/// flagged [`PlannerFlag::NonAmortizing`] instead of looping to the cap.
pub fn amortize(terms: &LoanTerms, iteration_cap: u32) -> AmortizationSchedule {
    let rate = terms.periodic_rate();

    if !terms.principal.is_positive() {
        return AmortizationSchedule::default();
    }

    let first_interest = terms.principal.apply_rate(rate);
    if !terms.payment.is_positive() || terms.payment <= first_interest {
        debug!(
            principal = %terms.principal,
            payment = %terms.payment,
            interest = %first_interest,
            "payment does not amortize"
        );
        return AmortizationSchedule {
            flags: vec![PlannerFlag::NonAmortizing],
            ..Default::default()
        };
    }

    let mut rows = Vec::new();
    let mut balance = terms.principal;
    for period in 1..=iteration_cap {
        let step = step_period(balance, rate, terms.payment);
        balance = step.balance;
        rows.push(AmortizationRow {
            period,
            date: advance_period(terms.start_date, terms.frequency, period as i32),
            payment: step.payment(),
            principal: step.principal,
            interest: step.interest,
            balance,
        });
        if balance <= PAID_OFF_EPSILON {
            break;
        }
    }

    let mut schedule = AmortizationSchedule {
        rows,
        ..Default::default()
    };
    if balance > PAID_OFF_EPSILON {
        warn!(iterations = iteration_cap, %balance, "amortization hit iteration cap");
        schedule.truncated = true;
        schedule.flags.push(PlannerFlag::IterationCapReached {
            iterations: iteration_cap,
        });
    }
    schedule
}

/// Schedule for an asset loan
pub fn amortize_asset(loan: &AssetLoan, iteration_cap: u32) -> AmortizationSchedule {
    amortize(&LoanTerms::from_asset(loan), iteration_cap)
}
