//! Bill models
//!
//! Recurring bills repeat on a frequency and move their next due date forward
//! when paid. One-time bills have a terminal lifecycle: once paid they stay
//! paid and never generate another due date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::BudgetCategory;
use super::frequency::Frequency;
use super::ids::{BillId, OneTimeBillId};
use super::money::Money;

/// Default number of historical payments kept for variable bills
pub const DEFAULT_HISTORY_CAP: usize = 12;

/// Which paycheck a bill should come out of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentPreference {
    /// Let the assignment engine decide
    #[default]
    Auto,
    /// Always the first upcoming paycheck
    Check1,
    /// Always the second upcoming paycheck
    Check2,
}

impl AssignmentPreference {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Some(Self::Auto),
            "check1" | "1" | "first" => Some(Self::Check1),
            "check2" | "2" | "second" => Some(Self::Check2),
            _ => None,
        }
    }
}

impl fmt::Display for AssignmentPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Check1 => write!(f, "check1"),
            Self::Check2 => write!(f, "check2"),
        }
    }
}

/// One observed payment of a variable bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalPayment {
    pub date: NaiveDate,
    pub amount: Money,
}

/// A bill that repeats on a fixed cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringBill {
    pub id: BillId,
    pub name: String,
    pub amount_estimate: Money,
    /// Day of month the bill falls on (1-31, clamped in short months)
    pub due_day: u32,
    pub frequency: Frequency,
    /// Month (1-12) anchoring quarterly, biannual and annual bills
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub category: BudgetCategory,
    #[serde(default)]
    pub autopay: bool,
    #[serde(default)]
    pub assignment_preference: AssignmentPreference,
    #[serde(default)]
    pub variable: bool,
    #[serde(default)]
    pub historical_payments: Vec<HistoricalPayment>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_paid_date: Option<NaiveDate>,
}

impl RecurringBill {
    pub fn new(name: impl Into<String>, amount_estimate: Money, due_day: u32, frequency: Frequency) -> Self {
        Self {
            id: BillId::new(),
            name: name.into(),
            amount_estimate: amount_estimate.non_negative(),
            due_day: due_day.clamp(1, 31),
            frequency,
            start_month: None,
            category: BudgetCategory::Other,
            autopay: false,
            assignment_preference: AssignmentPreference::Auto,
            variable: false,
            historical_payments: Vec::new(),
            paid: false,
            next_due_date: None,
            last_paid_date: None,
        }
    }

    /// A bill due every month on `due_day`
    pub fn monthly(name: impl Into<String>, amount_estimate: Money, due_day: u32) -> Self {
        Self::new(name, amount_estimate, due_day, Frequency::Monthly)
    }

    pub fn with_start_month(mut self, start_month: u32) -> Self {
        self.start_month = Some(start_month.clamp(1, 12));
        self
    }

    pub fn with_category(mut self, category: BudgetCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_autopay(mut self, autopay: bool) -> Self {
        self.autopay = autopay;
        self
    }

    pub fn with_preference(mut self, preference: AssignmentPreference) -> Self {
        self.assignment_preference = preference;
        self
    }

    pub fn with_next_due_date(mut self, next_due_date: NaiveDate) -> Self {
        self.next_due_date = Some(next_due_date);
        self
    }

    pub fn variable(mut self) -> Self {
        self.variable = true;
        self
    }

    /// Start month for cadence math, defaulting to January
    pub fn effective_start_month(&self) -> u32 {
        self.start_month.unwrap_or(1)
    }

    /// Append a payment, dropping the oldest entries beyond `cap`
    ///
    /// Variable bills re-derive their estimate from the retained history.
    pub fn record_payment(&mut self, payment: HistoricalPayment, cap: usize) {
        self.historical_payments.push(payment);
        self.historical_payments.sort_by_key(|p| p.date);
        let cap = cap.max(1);
        if self.historical_payments.len() > cap {
            let excess = self.historical_payments.len() - cap;
            self.historical_payments.drain(..excess);
        }
        self.recompute_estimate();
    }

    /// Remove the payment at `index`, returning it
    pub fn remove_payment(&mut self, index: usize) -> Option<HistoricalPayment> {
        if index >= self.historical_payments.len() {
            return None;
        }
        let removed = self.historical_payments.remove(index);
        self.recompute_estimate();
        Some(removed)
    }

    /// Mean of the recorded payments, rounded to the cent
    pub fn historical_average(&self) -> Option<Money> {
        if self.historical_payments.is_empty() {
            return None;
        }
        let total: i64 = self.historical_payments.iter().map(|p| p.amount.cents()).sum();
        let count = self.historical_payments.len() as f64;
        Some(Money::from_cents((total as f64 / count).round() as i64))
    }

    /// Keep `amount_estimate` equal to the history mean for variable bills
    pub fn recompute_estimate(&mut self) {
        if !self.variable {
            return;
        }
        if let Some(average) = self.historical_average() {
            self.amount_estimate = average.non_negative();
        }
    }
}

/// A bill that is paid once and then done
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeBill {
    pub id: OneTimeBillId,
    pub name: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub category: BudgetCategory,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

impl OneTimeBill {
    pub fn new(name: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        Self {
            id: OneTimeBillId::new(),
            name: name.into(),
            amount: amount.non_negative(),
            due_date,
            category: BudgetCategory::Other,
            paid: false,
            paid_date: None,
        }
    }

    /// Flip the paid flag; the due date never moves
    pub fn toggle_paid(&self, today: NaiveDate) -> Self {
        let mut next = self.clone();
        next.paid = !self.paid;
        next.paid_date = if next.paid { Some(today) } else { None };
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payment(day: u32, cents: i64) -> HistoricalPayment {
        HistoricalPayment {
            date: date(2024, 1, day),
            amount: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_variable_estimate_tracks_history_mean() {
        let mut bill = RecurringBill::monthly("Electric", Money::from_dollars(100), 12).variable();
        bill.record_payment(payment(1, 9_000), 12);
        bill.record_payment(payment(2, 11_001), 12);
        // (90.00 + 110.01) / 2 = 100.005 -> 100.01
        assert_eq!(bill.amount_estimate.cents(), 10_001);

        bill.remove_payment(0);
        assert_eq!(bill.amount_estimate.cents(), 11_001);
    }

    #[test]
    fn test_fixed_bill_estimate_is_untouched() {
        let mut bill = RecurringBill::monthly("Rent", Money::from_dollars(1000), 1);
        bill.record_payment(payment(1, 50_000), 12);
        assert_eq!(bill.amount_estimate, Money::from_dollars(1000));
    }

    #[test]
    fn test_history_cap_drops_oldest() {
        let mut bill = RecurringBill::monthly("Water", Money::zero(), 5).variable();
        for day in 1..=5 {
            bill.record_payment(payment(day, day as i64 * 1_000), 3);
        }
        assert_eq!(bill.historical_payments.len(), 3);
        assert_eq!(bill.historical_payments[0].date, date(2024, 1, 3));
        assert_eq!(bill.amount_estimate.cents(), 4_000);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut bill = RecurringBill::monthly("Water", Money::zero(), 5);
        assert!(bill.remove_payment(0).is_none());
    }

    #[test]
    fn test_one_time_toggle_is_terminal() {
        let bill = OneTimeBill::new("Car repair", Money::from_dollars(450), date(2024, 3, 10));
        let paid = bill.toggle_paid(date(2024, 3, 8));
        assert!(paid.paid);
        assert_eq!(paid.paid_date, Some(date(2024, 3, 8)));
        assert_eq!(paid.due_date, bill.due_date);

        let unpaid = paid.toggle_paid(date(2024, 3, 9));
        assert!(!unpaid.paid);
        assert_eq!(unpaid.due_date, bill.due_date);
    }

    #[test]
    fn test_preference_parse() {
        assert_eq!(AssignmentPreference::parse("Check2"), Some(AssignmentPreference::Check2));
        assert_eq!(AssignmentPreference::parse(""), Some(AssignmentPreference::Auto));
        assert_eq!(AssignmentPreference::parse("check3"), None);
    }
}
