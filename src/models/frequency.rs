//! Recurrence vocabulary shared by pay schedules, bills and loans

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a paycheck, bill or loan payment repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    /// Twice a month on two anchor days (1st and 15th unless configured)
    Semimonthly,
    #[default]
    Monthly,
    Quarterly,
    /// Twice a year, six months apart
    Biannual,
    Annual,
}

impl Frequency {
    pub const ALL: [Frequency; 7] = [
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Semimonthly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Biannual,
        Frequency::Annual,
    ];

    /// Parse a frequency name, accepting the spellings stored records use
    ///
    /// Returns `None` for anything outside the planner's vocabulary; callers
    /// at the persistence boundary fall back to `Monthly` and raise a flag.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match normalized.as_str() {
            "weekly" | "week" => Some(Self::Weekly),
            "biweekly" | "fortnightly" | "everyotherweek" => Some(Self::Biweekly),
            "semimonthly" | "twicemonthly" | "twiceamonth" => Some(Self::Semimonthly),
            "monthly" | "month" => Some(Self::Monthly),
            "quarterly" | "quarter" => Some(Self::Quarterly),
            "biannual" | "biannually" | "semiannual" | "semiannually" | "halfyearly" => {
                Some(Self::Biannual)
            }
            "annual" | "annually" | "yearly" | "year" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Number of payment periods in a year
    pub const fn periods_per_year(&self) -> u32 {
        match self {
            Self::Weekly => 52,
            Self::Biweekly => 26,
            Self::Semimonthly => 24,
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Biannual => 2,
            Self::Annual => 1,
        }
    }

    /// Fixed day step for day-based frequencies
    pub const fn day_step(&self) -> Option<i64> {
        match self {
            Self::Weekly => Some(7),
            Self::Biweekly => Some(14),
            _ => None,
        }
    }

    /// Month step for month-based frequencies
    pub const fn month_step(&self) -> Option<i32> {
        match self {
            Self::Monthly => Some(1),
            Self::Quarterly => Some(3),
            Self::Biannual => Some(6),
            Self::Annual => Some(12),
            _ => None,
        }
    }

    /// Whether a pay schedule may use this frequency
    pub const fn is_pay_frequency(&self) -> bool {
        matches!(
            self,
            Self::Weekly | Self::Biweekly | Self::Semimonthly | Self::Monthly
        )
    }

    /// Whether a recurring bill may use this frequency
    pub const fn is_bill_frequency(&self) -> bool {
        !matches!(self, Self::Semimonthly)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Semimonthly => "semimonthly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Biannual => "biannual",
            Self::Annual => "annual",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
