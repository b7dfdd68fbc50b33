//! Fixed spending category set
//!
//! Budgets, bills and classified transactions all land in one of these
//! categories. Unknown labels become [`BudgetCategory::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Housing,
    Utilities,
    Groceries,
    Dining,
    Transportation,
    Insurance,
    Healthcare,
    Debt,
    Subscriptions,
    Entertainment,
    Shopping,
    Personal,
    Savings,
    #[default]
    Other,
}

impl BudgetCategory {
    /// Every category, in display order
    pub const ALL: [BudgetCategory; 14] = [
        Self::Housing,
        Self::Utilities,
        Self::Groceries,
        Self::Dining,
        Self::Transportation,
        Self::Insurance,
        Self::Healthcare,
        Self::Debt,
        Self::Subscriptions,
        Self::Entertainment,
        Self::Shopping,
        Self::Personal,
        Self::Savings,
        Self::Other,
    ];

    /// Recognize a category label, including common synonyms
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        let category = match label.as_str() {
            "housing" | "rent" | "mortgage" | "home" => Self::Housing,
            "utilities" | "utility" | "electric" | "electricity" | "water" | "gas"
            | "internet" | "phone" => Self::Utilities,
            "groceries" | "grocery" | "food" | "supermarket" => Self::Groceries,
            "dining" | "restaurant" | "restaurants" | "dining out" | "takeout" => Self::Dining,
            "transportation" | "transport" | "auto" | "car" | "fuel" | "transit" => {
                Self::Transportation
            }
            "insurance" => Self::Insurance,
            "healthcare" | "health" | "medical" | "pharmacy" => Self::Healthcare,
            "debt" | "loan" | "loans" | "credit card" | "credit" => Self::Debt,
            "subscriptions" | "subscription" | "streaming" => Self::Subscriptions,
            "entertainment" | "fun" | "recreation" => Self::Entertainment,
            "shopping" | "clothing" | "retail" => Self::Shopping,
            "personal" | "personal care" => Self::Personal,
            "savings" | "saving" | "investment" | "investments" => Self::Savings,
            "other" | "misc" | "miscellaneous" => Self::Other,
            _ => return None,
        };
        Some(category)
    }

    /// Parse a label, falling back to `Other`
    pub fn parse_or_other(label: &str) -> Self {
        Self::parse(label).unwrap_or(Self::Other)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Groceries => "groceries",
            Self::Dining => "dining",
            Self::Transportation => "transportation",
            Self::Insurance => "insurance",
            Self::Healthcare => "healthcare",
            Self::Debt => "debt",
            Self::Subscriptions => "subscriptions",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Personal => "personal",
            Self::Savings => "savings",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_synonyms() {
        assert_eq!(BudgetCategory::parse("Rent"), Some(BudgetCategory::Housing));
        assert_eq!(BudgetCategory::parse(" Dining Out "), Some(BudgetCategory::Dining));
        assert_eq!(BudgetCategory::parse("credit card"), Some(BudgetCategory::Debt));
        assert_eq!(BudgetCategory::parse("crypto"), None);
    }

    #[test]
    fn test_every_name_round_trips() {
        for category in BudgetCategory::ALL {
            assert_eq!(BudgetCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_fallback() {
        assert_eq!(BudgetCategory::parse_or_other("???"), BudgetCategory::Other);
    }
}
