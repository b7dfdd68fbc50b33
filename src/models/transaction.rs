//! Spending records fed to the budget actuals report
//!
//! Bills, scanned receipts and synced bank transactions all arrive in this
//! one shape. Positive amounts are spending; negative amounts are credits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Where a spending record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Bill,
    Receipt,
    Synced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLike {
    pub id: String,
    pub date: NaiveDate,
    /// Category label as recorded by the source
    #[serde(default)]
    pub category: String,
    pub amount: Money,
    pub source_kind: SourceKind,
    #[serde(default)]
    pub name: String,
    /// Source-specific type label ("transfer", "debit", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TransactionLike {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
        source_kind: SourceKind,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            category: category.into(),
            amount,
            source_kind,
            name: String::new(),
            kind: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Lowercased text fields used for keyword matching
    pub fn searchable_text(&self) -> String {
        let mut text = String::new();
        if let Some(kind) = &self.kind {
            text.push_str(kind);
            text.push(' ');
        }
        text.push_str(&self.category);
        text.push(' ');
        text.push_str(&self.name);
        text.to_lowercase()
    }
}
