//! Debts tracked for payoff projection (credit cards, personal loans)

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::DebtId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    pub name: String,
    pub balance: Money,
    /// Annual interest rate in percent
    pub rate: f64,
    /// Monthly payment
    pub payment: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<Money>,
    /// Original term in months
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_term: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl Debt {
    pub fn new(name: impl Into<String>, balance: Money, rate: f64, payment: Money) -> Self {
        Self {
            id: DebtId::new(),
            name: name.into(),
            balance,
            rate,
            payment,
            loan_amount: None,
            loan_term: None,
            start_date: None,
        }
    }

    pub fn with_origination(mut self, loan_amount: Money, loan_term: u32, start_date: NaiveDate) -> Self {
        self.loan_amount = Some(loan_amount);
        self.loan_term = Some(loan_term);
        self.start_date = Some(start_date);
        self
    }

    /// Share of the original amount repaid, when the original amount is known
    pub fn progress_percent(&self) -> Option<f64> {
        let original = self.loan_amount.filter(|m| m.is_positive())?;
        let repaid = (original - self.balance).non_negative();
        Some((repaid.cents() as f64 / original.cents() as f64 * 100.0).clamp(0.0, 100.0))
    }

    /// Whole months elapsed since the start date
    pub fn months_elapsed(&self, today: NaiveDate) -> Option<u32> {
        let start = self.start_date?;
        if today < start {
            return Some(0);
        }
        let mut months = (today.year() - start.year()) * 12 + today.month() as i32
            - start.month() as i32;
        if today.day() < start.day() {
            months -= 1;
        }
        Some(months.max(0) as u32)
    }

    /// Months left on the original term, when the term is known
    pub fn months_remaining_on_term(&self, today: NaiveDate) -> Option<u32> {
        let term = self.loan_term?;
        let elapsed = self.months_elapsed(today)?;
        Some(term.saturating_sub(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_progress_requires_original_amount() {
        let card = Debt::new("Card", Money::from_dollars(5_000), 20.0, Money::from_dollars(50));
        assert!(card.progress_percent().is_none());

        let loan = Debt::new("Loan", Money::from_dollars(6_000), 8.0, Money::from_dollars(300))
            .with_origination(Money::from_dollars(8_000), 36, date(2023, 6, 15));
        assert!((loan.progress_percent().unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_months_elapsed() {
        let loan = Debt::new("Loan", Money::from_dollars(6_000), 8.0, Money::from_dollars(300))
            .with_origination(Money::from_dollars(8_000), 36, date(2023, 6, 15));
        assert_eq!(loan.months_elapsed(date(2024, 6, 14)), Some(11));
        assert_eq!(loan.months_elapsed(date(2024, 6, 15)), Some(12));
        assert_eq!(loan.months_elapsed(date(2023, 1, 1)), Some(0));
        assert_eq!(loan.months_remaining_on_term(date(2024, 6, 15)), Some(24));
    }
}
