//! Asset loans (car, furniture, anything financed against an asset)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::frequency::Frequency;
use super::ids::AssetId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetLoan {
    pub id: AssetId,
    pub name: String,
    pub loan_amount: Money,
    /// Outstanding balance; absent on records created before balances were tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Money>,
    /// Annual interest rate in percent (6.5 means 6.5%)
    pub interest_rate: f64,
    pub payment_amount: Money,
    #[serde(default)]
    pub payment_frequency: Frequency,
    pub start_date: NaiveDate,
}

impl AssetLoan {
    pub fn new(
        name: impl Into<String>,
        loan_amount: Money,
        interest_rate: f64,
        payment_amount: Money,
        payment_frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: AssetId::new(),
            name: name.into(),
            loan_amount,
            current_balance: None,
            interest_rate,
            payment_amount,
            payment_frequency,
            start_date,
        }
    }

    pub fn with_current_balance(mut self, balance: Money) -> Self {
        self.current_balance = Some(balance);
        self
    }

    /// Principal the amortization starts from
    ///
    /// The current balance wins when present; otherwise the original loan
    /// amount is used.
    pub fn principal(&self) -> Money {
        self.current_balance.unwrap_or(self.loan_amount)
    }

    /// Share of the original loan already repaid, 0-100
    pub fn progress_percent(&self) -> f64 {
        if !self.loan_amount.is_positive() {
            return 0.0;
        }
        let repaid = (self.loan_amount - self.principal()).non_negative();
        (repaid.cents() as f64 / self.loan_amount.cents() as f64 * 100.0).clamp(0.0, 100.0)
    }
}
