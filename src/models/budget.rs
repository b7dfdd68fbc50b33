//! Category budget configuration
//!
//! Default caps apply to every month; a month override replaces the default
//! for the categories it names. Overrides are upserted per month and are
//! never removed automatically.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::category::BudgetCategory;
use super::money::Money;
use super::month::MonthKey;

pub type CategoryCaps = BTreeMap<BudgetCategory, Money>;

/// Rules that keep transactions out of category actuals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetExclusions {
    #[serde(default)]
    pub exclude_transfers: bool,
    #[serde(default)]
    pub exclude_refunds: bool,
    #[serde(default)]
    pub excluded_ids: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(default)]
    pub default_caps: CategoryCaps,
    #[serde(default)]
    pub monthly_caps: BTreeMap<MonthKey, CategoryCaps>,
    #[serde(default)]
    pub exclusions: BudgetExclusions,
}

impl BudgetConfig {
    /// Caps in force for `month`
    pub fn effective_caps(&self, month: MonthKey) -> CategoryCaps {
        let mut caps = self.default_caps.clone();
        if let Some(overrides) = self.monthly_caps.get(&month) {
            for (category, amount) in overrides {
                caps.insert(*category, *amount);
            }
        }
        caps
    }

    /// Cap for one category in `month` (zero when unbudgeted)
    pub fn cap_for(&self, month: MonthKey, category: BudgetCategory) -> Money {
        self.monthly_caps
            .get(&month)
            .and_then(|caps| caps.get(&category))
            .or_else(|| self.default_caps.get(&category))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_default_cap(&mut self, category: BudgetCategory, amount: Money) {
        self.default_caps.insert(category, amount.non_negative());
    }

    /// Insert or replace a month-specific cap
    pub fn upsert_month_cap(&mut self, month: MonthKey, category: BudgetCategory, amount: Money) {
        self.monthly_caps
            .entry(month)
            .or_default()
            .insert(category, amount.non_negative());
    }

    pub fn exclude_id(&mut self, id: impl Into<String>) -> bool {
        self.exclusions.excluded_ids.insert(id.into())
    }
}
