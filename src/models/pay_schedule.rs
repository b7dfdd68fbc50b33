//! Pay schedule model
//!
//! A pay schedule says how often income arrives and where the sequence is
//! anchored. Each frequency carries exactly the anchor it needs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::frequency::Frequency;
use super::money::Money;

/// Default semimonthly pay days
pub const DEFAULT_SEMIMONTHLY_DAYS: [u32; 2] = [1, 15];

/// Frequency plus anchor for a pay schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum PayCadence {
    /// Every 7 days from the next known pay date
    Weekly { next_pay_date: NaiveDate },

    /// Every 14 days from the next known pay date
    Biweekly { next_pay_date: NaiveDate },

    /// Twice a month on two anchor days (1st and 15th when unset)
    Semimonthly {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anchor_days: Option<[u32; 2]>,
    },

    /// Once a month on a day of month (clamped in short months)
    Monthly { day_of_month: u32 },
}

impl PayCadence {
    pub fn frequency(&self) -> Frequency {
        match self {
            Self::Weekly { .. } => Frequency::Weekly,
            Self::Biweekly { .. } => Frequency::Biweekly,
            Self::Semimonthly { .. } => Frequency::Semimonthly,
            Self::Monthly { .. } => Frequency::Monthly,
        }
    }

    /// Semimonthly anchor days, sorted, defaulting to the 1st and 15th
    pub fn semimonthly_days(&self) -> [u32; 2] {
        match self {
            Self::Semimonthly {
                anchor_days: Some([a, b]),
            } => {
                if a <= b {
                    [*a, *b]
                } else {
                    [*b, *a]
                }
            }
            _ => DEFAULT_SEMIMONTHLY_DAYS,
        }
    }
}

/// Recurring income definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySchedule {
    pub pay_amount: Money,
    #[serde(flatten)]
    pub cadence: PayCadence,
}

impl PaySchedule {
    pub fn new(pay_amount: Money, cadence: PayCadence) -> Self {
        Self {
            pay_amount: pay_amount.non_negative(),
            cadence,
        }
    }

    pub fn weekly(pay_amount: Money, next_pay_date: NaiveDate) -> Self {
        Self::new(pay_amount, PayCadence::Weekly { next_pay_date })
    }

    pub fn biweekly(pay_amount: Money, next_pay_date: NaiveDate) -> Self {
        Self::new(pay_amount, PayCadence::Biweekly { next_pay_date })
    }

    pub fn semimonthly(pay_amount: Money, anchor_days: Option<[u32; 2]>) -> Self {
        Self::new(pay_amount, PayCadence::Semimonthly { anchor_days })
    }

    pub fn monthly(pay_amount: Money, day_of_month: u32) -> Self {
        Self::new(pay_amount, PayCadence::Monthly { day_of_month })
    }

    pub fn frequency(&self) -> Frequency {
        self.cadence.frequency()
    }
}

/// A single projected paycheck
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaycheckEvent {
    pub date: NaiveDate,
    pub amount: Money,
}

impl PaycheckEvent {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self { date, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semimonthly_days_default_and_sorting() {
        let default = PaySchedule::semimonthly(Money::from_dollars(1500), None);
        assert_eq!(default.cadence.semimonthly_days(), [1, 15]);

        let reversed = PaySchedule::semimonthly(Money::from_dollars(1500), Some([20, 5]));
        assert_eq!(reversed.cadence.semimonthly_days(), [5, 20]);
    }

    #[test]
    fn test_negative_pay_is_clamped() {
        let schedule = PaySchedule::monthly(Money::from_cents(-100), 1);
        assert!(schedule.pay_amount.is_zero());
    }

    #[test]
    fn test_serialization_shape() {
        let schedule = PaySchedule::biweekly(
            Money::from_dollars(1000),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        );
        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["frequency"], "biweekly");
        assert_eq!(json["next_pay_date"], "2024-01-05");
        assert_eq!(json["pay_amount"], 100_000);

        let back: PaySchedule = serde_json::from_value(json).unwrap();
        assert_eq!(back, schedule);
    }
}
