//! Debt payoff projection
//!
//! The month count comes from the closed-form annuity formula. A monthly
//! simulation then accumulates the interest and fixes the payoff date, and
//! the two month counts are cross-checked.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use super::amortization::{step_period, DEFAULT_ITERATION_CAP};
use super::date_cursor::add_months;
use crate::models::{Debt, DebtId, Money, PlannerFlag};

/// Simulated and closed-form month counts may differ by this much
const CROSS_CHECK_TOLERANCE: u32 = 1;

/// Absorbs floating point noise before rounding a month count up
const CEIL_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoffProjection {
    /// Months according to the closed-form formula
    pub months: u32,
    /// Months the cent-rounded simulation actually took
    pub simulated_months: u32,
    pub total_interest: Money,
    pub total_paid: Money,
    pub payoff_date: NaiveDate,
    /// Whether the simulation agrees with the formula within one month
    pub consistent: bool,
    /// The simulation stopped at the iteration cap with a balance left
    pub truncated: bool,
    pub flags: Vec<PlannerFlag>,
}

/// Result of projecting one debt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PayoffOutcome {
    PaidOff(PayoffProjection),
    /// The payment does not cover the interest accruing each month
    PaymentTooLow { monthly_interest: Money, payment: Money },
}

impl PayoffOutcome {
    pub fn projection(&self) -> Option<&PayoffProjection> {
        match self {
            Self::PaidOff(projection) => Some(projection),
            Self::PaymentTooLow { .. } => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::PaymentTooLow { .. })
    }

    /// Flags describing the outcome
    pub fn flags(&self) -> Vec<PlannerFlag> {
        match self {
            Self::PaidOff(projection) => projection.flags.clone(),
            Self::PaymentTooLow { .. } => vec![PlannerFlag::InfinitePayoff],
        }
    }
}

/// Monthly rate for an annual percent rate
pub fn monthly_rate(annual_rate: f64) -> f64 {
    annual_rate / 100.0 / 12.0
}

/// Closed-form month count, or `None` when the balance never reaches zero
pub fn closed_form_months(balance: Money, annual_rate: f64, payment: Money) -> Option<u32> {
    if !balance.is_positive() {
        return Some(0);
    }
    if !payment.is_positive() {
        return None;
    }

    let rate = monthly_rate(annual_rate);
    if rate <= 0.0 {
        // Integer ceiling keeps the zero-rate case exact.
        let months = (balance.cents() + payment.cents() - 1) / payment.cents();
        return u32::try_from(months).ok();
    }

    let balance = balance.as_dollars_f64();
    let payment = payment.as_dollars_f64();
    if payment <= balance * rate {
        return None;
    }
    let months = -(1.0 - rate * balance / payment).ln() / (1.0 + rate).ln();
    Some((months - CEIL_EPSILON).ceil().max(0.0) as u32)
}

/// Project payoff for a balance paid monthly starting one month after `today`
pub fn project_payoff(
    balance: Money,
    annual_rate: f64,
    payment: Money,
    today: NaiveDate,
    iteration_cap: u32,
) -> PayoffOutcome {
    let Some(months) = closed_form_months(balance, annual_rate, payment) else {
        let monthly_interest = balance.apply_rate(monthly_rate(annual_rate));
        debug!(%balance, %payment, %monthly_interest, "payment too low to pay off debt");
        return PayoffOutcome::PaymentTooLow {
            monthly_interest,
            payment,
        };
    };

    let rate = monthly_rate(annual_rate);
    let mut remaining = balance;
    let mut simulated_months = 0u32;
    let mut total_interest = Money::zero();
    let mut total_paid = Money::zero();
    while remaining.is_positive() && simulated_months < iteration_cap {
        let step = step_period(remaining, rate, payment);
        total_interest += step.interest;
        total_paid += step.payment();
        remaining = step.balance;
        simulated_months += 1;
    }

    let mut flags = Vec::new();
    if remaining.is_positive() {
        warn!(iterations = iteration_cap, %remaining, "payoff simulation hit iteration cap");
        flags.push(PlannerFlag::IterationCapReached {
            iterations: iteration_cap,
        });
    }

    let consistent = months.abs_diff(simulated_months) <= CROSS_CHECK_TOLERANCE;
    if !consistent {
        warn!(
            closed_form = months,
            simulated = simulated_months,
            "payoff month counts disagree"
        );
    }

    PayoffOutcome::PaidOff(PayoffProjection {
        months,
        simulated_months,
        total_interest,
        total_paid,
        payoff_date: add_months(today, simulated_months as i32),
        consistent,
        truncated: remaining.is_positive(),
        flags,
    })
}

/// Project payoff for a stored debt
pub fn project_debt(debt: &Debt, today: NaiveDate, iteration_cap: u32) -> PayoffOutcome {
    project_payoff(debt.balance, debt.rate, debt.payment, today, iteration_cap)
}

/// One debt's line in a portfolio summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtPayoffLine {
    pub id: DebtId,
    pub name: String,
    pub balance: Money,
    pub payment: Money,
    pub outcome: PayoffOutcome,
    pub progress_percent: Option<f64>,
}

/// Totals across every tracked debt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtPortfolioSummary {
    pub lines: Vec<DebtPayoffLine>,
    pub total_balance: Money,
    pub total_monthly_payment: Money,
    /// Balance-weighted average annual rate
    pub weighted_rate: f64,
    /// Interest still to pay on debts that do pay off
    pub total_interest: Money,
    /// When the last payable debt is cleared
    pub debt_free_date: Option<NaiveDate>,
    /// Debts whose payment never covers the interest
    pub unpayable: usize,
}

impl DebtPortfolioSummary {
    pub fn generate(debts: &[Debt], today: NaiveDate, iteration_cap: u32) -> Self {
        let lines: Vec<DebtPayoffLine> = debts
            .iter()
            .map(|debt| DebtPayoffLine {
                id: debt.id,
                name: debt.name.clone(),
                balance: debt.balance,
                payment: debt.payment,
                outcome: project_debt(debt, today, iteration_cap),
                progress_percent: debt.progress_percent(),
            })
            .collect();

        let total_balance: Money = debts.iter().map(|d| d.balance).sum();
        let total_monthly_payment: Money = debts.iter().map(|d| d.payment).sum();
        let weighted_rate = if total_balance.is_positive() {
            debts
                .iter()
                .map(|d| d.rate * d.balance.as_dollars_f64())
                .sum::<f64>()
                / total_balance.as_dollars_f64()
        } else {
            0.0
        };

        let projections = || lines.iter().filter_map(|line| line.outcome.projection());
        let total_interest = projections().map(|p| p.total_interest).sum();
        let unpayable = lines.iter().filter(|line| line.outcome.is_infinite()).count();
        let debt_free_date = if unpayable == 0 {
            projections().map(|p| p.payoff_date).max()
        } else {
            None
        };

        Self {
            lines,
            total_balance,
            total_monthly_payment,
            weighted_rate,
            total_interest,
            debt_free_date,
            unpayable,
        }
    }
}

/// Project with the default cap
pub fn project_debt_default(debt: &Debt, today: NaiveDate) -> PayoffOutcome {
    project_debt(debt, today, DEFAULT_ITERATION_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_payment_too_low() {
        let card = Debt::new("Card", Money::from_dollars(5_000), 20.0, Money::from_dollars(50));
        let outcome = project_debt_default(&card, date(2024, 1, 1));
        match outcome {
            PayoffOutcome::PaymentTooLow { monthly_interest, .. } => {
                assert_eq!(monthly_interest, Money::from_cents(8_333));
            }
            other => panic!("expected payment too low, got {:?}", other),
        }
        assert_eq!(outcome.flags(), vec![PlannerFlag::InfinitePayoff]);
        assert!(closed_form_months(card.balance, card.rate, card.payment).is_none());
    }

    #[test]
    fn test_zero_rate_is_exact_ceiling() {
        let cases = [(1_000_00, 100_00), (1_000_00, 300_00), (1, 7), (99_99, 33_33), (12_345_67, 1_00)];
        for (balance, payment) in cases {
            let balance = Money::from_cents(balance);
            let payment = Money::from_cents(payment);
            let expected = ((balance.cents() as f64) / (payment.cents() as f64)).ceil() as u32;
            assert_eq!(closed_form_months(balance, 0.0, payment), Some(expected));

            let projection = project_payoff(balance, 0.0, payment, date(2024, 1, 1), 100_000);
            let projection = projection.projection().unwrap().clone();
            assert_eq!(projection.months, expected);
            assert_eq!(projection.simulated_months, expected);
            assert!(projection.total_interest.is_zero());
        }
    }

    #[test]
    fn test_interest_bearing_projection() {
        let loan = Debt::new("Loan", Money::from_dollars(10_000), 6.0, Money::from_dollars(200));
        let outcome = project_debt_default(&loan, date(2024, 1, 15));
        let projection = outcome.projection().unwrap();
        // ln(1/(1 - 0.25)) / ln(1.005) = 57.68
        assert_eq!(projection.months, 58);
        assert!(projection.consistent);
        assert!(!projection.truncated);
        assert!(projection.total_interest > Money::from_dollars(1_500));
        assert_eq!(projection.total_paid, projection.total_interest + loan.balance);
        assert_eq!(
            projection.payoff_date,
            add_months(date(2024, 1, 15), projection.simulated_months as i32)
        );
    }

    #[test]
    fn test_zero_balance_is_already_paid() {
        let done = Debt::new("Done", Money::zero(), 12.0, Money::from_dollars(100));
        let projection = project_debt_default(&done, date(2024, 1, 1));
        let projection = projection.projection().unwrap();
        assert_eq!(projection.months, 0);
        assert_eq!(projection.payoff_date, date(2024, 1, 1));
    }

    #[test]
    fn test_zero_payment_never_pays_off() {
        let stuck = Debt::new("Stuck", Money::from_dollars(100), 0.0, Money::zero());
        assert!(project_debt_default(&stuck, date(2024, 1, 1)).is_infinite());
    }

    #[test]
    fn test_cap_flags_partial_simulation() {
        let loan = Debt::new("Loan", Money::from_dollars(10_000), 6.0, Money::from_dollars(200));
        let outcome = project_debt(&loan, date(2024, 1, 1), 10);
        let projection = outcome.projection().unwrap();
        assert_eq!(projection.simulated_months, 10);
        assert!(!projection.consistent);
        assert!(projection.truncated);
        assert_eq!(projection.flags, vec![PlannerFlag::IterationCapReached { iterations: 10 }]);
    }

    #[test]
    fn test_portfolio_summary() {
        let debts = vec![
            Debt::new("Card", Money::from_dollars(3_000), 20.0, Money::from_dollars(150)),
            Debt::new("Car", Money::from_dollars(1_000), 0.0, Money::from_dollars(250)),
        ];
        let summary = DebtPortfolioSummary::generate(&debts, date(2024, 1, 1), DEFAULT_ITERATION_CAP);
        assert_eq!(summary.total_balance, Money::from_dollars(4_000));
        assert_eq!(summary.total_monthly_payment, Money::from_dollars(400));
        assert!((summary.weighted_rate - 15.0).abs() < 1e-9);
        assert_eq!(summary.unpayable, 0);
        let card = summary.lines[0].outcome.projection().unwrap();
        assert_eq!(summary.debt_free_date, Some(card.payoff_date));
    }

    #[test]
    fn test_portfolio_with_unpayable_debt_has_no_free_date() {
        let debts = vec![
            Debt::new("Card", Money::from_dollars(5_000), 20.0, Money::from_dollars(50)),
            Debt::new("Car", Money::from_dollars(1_000), 0.0, Money::from_dollars(250)),
        ];
        let summary = DebtPortfolioSummary::generate(&debts, date(2024, 1, 1), DEFAULT_ITERATION_CAP);
        assert_eq!(summary.unpayable, 1);
        assert!(summary.debt_free_date.is_none());
        assert!(summary.total_interest.is_zero());
    }
}
