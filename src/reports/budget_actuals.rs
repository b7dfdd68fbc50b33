//! Budget Actuals Report
//!
//! Compares one month's category caps with what was actually spent.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{
    BudgetCategory, BudgetConfig, Money, MonthKey, PaycheckEvent, SourceKind, TransactionLike,
};

/// Keywords marking a transaction as a movement between own accounts
pub const TRANSFER_KEYWORDS: [&str; 3] = ["transfer", "xfer", "credit card payment"];

/// Keywords marking a transaction as money coming back
pub const REFUND_KEYWORDS: [&str; 3] = ["refund", "reversal", "return"];

/// Actuals for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryActuals {
    pub category: BudgetCategory,
    pub assigned: Money,
    pub spent: Money,
    pub remaining: Money,
    /// Spent as a share of assigned
    pub percent: f64,
    pub transaction_count: usize,
}

impl CategoryActuals {
    fn new(category: BudgetCategory, assigned: Money, spent: Money, transaction_count: usize) -> Self {
        let percent = if assigned.is_positive() {
            spent.cents() as f64 / assigned.cents() as f64 * 100.0
        } else if spent.is_zero() {
            0.0
        } else {
            100.0
        };
        Self {
            category,
            assigned,
            spent,
            remaining: assigned - spent,
            percent,
            transaction_count,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.assigned
    }
}

/// Why a transaction was left out of the actuals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exclusion {
    ById,
    Transfer,
    Refund,
}

/// Budget vs actual spending for a month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetActualsReport {
    pub month: MonthKey,
    pub categories: Vec<CategoryActuals>,
    pub total_assigned: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    /// Pay received in the month plus refunds kept out of spending
    pub total_income: Money,
    pub excluded_count: usize,
}

impl BudgetActualsReport {
    /// Generate the report for `month`
    ///
    /// Transactions outside the month are ignored; `paychecks` may span any
    /// range and only those dated inside the month count as income.
    pub fn generate(
        config: &BudgetConfig,
        month: MonthKey,
        transactions: &[TransactionLike],
        paychecks: &[PaycheckEvent],
    ) -> Self {
        let caps = config.effective_caps(month);
        let mut spending: BTreeMap<BudgetCategory, (Money, usize)> = BTreeMap::new();
        let mut refund_income = Money::zero();
        let mut excluded_count = 0;

        for txn in transactions.iter().filter(|t| month.contains(t.date)) {
            if let Some(reason) = exclusion_for(config, txn) {
                debug!(id = %txn.id, ?reason, "excluded from budget actuals");
                excluded_count += 1;
                if reason == Exclusion::Refund {
                    refund_income += txn.amount.abs();
                }
                continue;
            }

            let entry = spending
                .entry(classify(txn))
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        }

        let categories: Vec<CategoryActuals> = BudgetCategory::ALL
            .iter()
            .filter_map(|category| {
                let assigned = caps.get(category).copied().unwrap_or_default();
                let (spent, count) = spending.get(category).copied().unwrap_or_default();
                if assigned.is_zero() && count == 0 {
                    return None;
                }
                Some(CategoryActuals::new(*category, assigned, spent, count))
            })
            .collect();

        let pay_income: Money = paychecks
            .iter()
            .filter(|p| month.contains(p.date))
            .map(|p| p.amount)
            .sum();

        let total_assigned: Money = categories.iter().map(|c| c.assigned).sum();
        let total_spent: Money = categories.iter().map(|c| c.spent).sum();

        Self {
            month,
            categories,
            total_assigned,
            total_spent,
            total_remaining: total_assigned - total_spent,
            total_income: pay_income + refund_income,
            excluded_count,
        }
    }

    pub fn category(&self, category: BudgetCategory) -> Option<&CategoryActuals> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Categories where spending has passed the cap
    pub fn over_budget(&self) -> Vec<&CategoryActuals> {
        self.categories.iter().filter(|c| c.is_over_budget()).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Actuals: {}\n", self.month));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!("Income: {}\n\n", self.total_income));

        output.push_str(&format!(
            "{:<18} {:>12} {:>12} {:>12} {:>8}\n",
            "Category", "Assigned", "Spent", "Remaining", "%"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.categories {
            let marker = if row.is_over_budget() { " !" } else { "" };
            output.push_str(&format!(
                "{:<18} {:>12} {:>12} {:>12} {:>7.1}%{}\n",
                row.category.to_string(),
                row.assigned,
                row.spent,
                row.remaining,
                row.percent,
                marker
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>12} {:>12} {:>12}\n",
            "TOTAL", self.total_assigned, self.total_spent, self.total_remaining
        ));
        if self.excluded_count > 0 {
            output.push_str(&format!("\n{} transaction(s) excluded\n", self.excluded_count));
        }

        output
    }
}

/// Category a transaction counts against
///
/// Bills carry one of the planner's own category names. Receipts and synced
/// transactions use free-form labels, so synonyms are accepted there.
pub fn classify(txn: &TransactionLike) -> BudgetCategory {
    match txn.source_kind {
        SourceKind::Bill => BudgetCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(txn.category.trim()))
            .unwrap_or_default(),
        SourceKind::Receipt | SourceKind::Synced => BudgetCategory::parse_or_other(&txn.category),
    }
}

pub fn is_transfer_like(txn: &TransactionLike) -> bool {
    let text = txn.searchable_text();
    TRANSFER_KEYWORDS.iter().any(|k| text.contains(k))
}

pub fn is_refund_like(txn: &TransactionLike) -> bool {
    if txn.amount.is_negative() {
        return true;
    }
    let text = txn.searchable_text();
    REFUND_KEYWORDS.iter().any(|k| text.contains(k))
}

fn exclusion_for(config: &BudgetConfig, txn: &TransactionLike) -> Option<Exclusion> {
    let rules = &config.exclusions;
    if rules.excluded_ids.contains(&txn.id) {
        return Some(Exclusion::ById);
    }
    if rules.exclude_transfers && is_transfer_like(txn) {
        return Some(Exclusion::Transfer);
    }
    if rules.exclude_refunds && is_refund_like(txn) {
        return Some(Exclusion::Refund);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn march() -> MonthKey {
        MonthKey::new(2025, 3).unwrap()
    }

    fn receipt(id: &str, category: &str, dollars: i64) -> TransactionLike {
        TransactionLike::new(id, date(10), category, Money::from_dollars(dollars), SourceKind::Receipt)
    }

    fn config() -> BudgetConfig {
        let mut config = BudgetConfig::default();
        config.set_default_cap(BudgetCategory::Groceries, Money::from_dollars(400));
        config.set_default_cap(BudgetCategory::Dining, Money::from_dollars(100));
        config
    }

    #[test]
    fn test_generate_budget_actuals() {
        let transactions = vec![
            receipt("r1", "groceries", 120),
            receipt("r2", "Supermarket", 80),
            receipt("r3", "restaurant", 130),
        ];
        let report = BudgetActualsReport::generate(&config(), march(), &transactions, &[]);

        let groceries = report.category(BudgetCategory::Groceries).unwrap();
        assert_eq!(groceries.spent, Money::from_dollars(200));
        assert_eq!(groceries.remaining, Money::from_dollars(200));
        assert!((groceries.percent - 50.0).abs() < 1e-9);
        assert_eq!(groceries.transaction_count, 2);

        let dining = report.category(BudgetCategory::Dining).unwrap();
        assert!(dining.is_over_budget());
        assert_eq!(report.over_budget().len(), 1);

        assert_eq!(report.total_assigned, Money::from_dollars(500));
        assert_eq!(report.total_spent, Money::from_dollars(330));
    }

    #[test]
    fn test_unknown_labels_fall_back_to_other() {
        let report = BudgetActualsReport::generate(
            &config(),
            march(),
            &[receipt("r1", "mystery", 25)],
            &[],
        );
        let other = report.category(BudgetCategory::Other).unwrap();
        assert_eq!(other.spent, Money::from_dollars(25));
        assert!((other.percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_bills_keep_stated_category() {
        let bill = TransactionLike::new("b1", date(1), "Utilities", Money::from_dollars(90), SourceKind::Bill);
        assert_eq!(classify(&bill), BudgetCategory::Utilities);
    }

    #[test]
    fn test_excluded_transfers_and_refunds_never_count_as_spending() {
        let mut config = config();
        config.exclusions.exclude_transfers = true;
        config.exclusions.exclude_refunds = true;

        let transactions = vec![
            receipt("r1", "groceries", 150),
            receipt("t1", "groceries", 500).with_name("Transfer to savings"),
            receipt("t2", "other", 300).with_kind("credit card payment"),
            receipt("f1", "groceries", -40),
            receipt("f2", "shopping", 60).with_name("Store return"),
        ];
        let report = BudgetActualsReport::generate(&config, march(), &transactions, &[]);

        assert_eq!(report.excluded_count, 4);
        assert_eq!(
            report.category(BudgetCategory::Groceries).unwrap().spent,
            Money::from_dollars(150)
        );
        assert!(report.category(BudgetCategory::Shopping).is_none());
        assert!(report.category(BudgetCategory::Other).is_none());
        assert_eq!(report.total_income, Money::from_dollars(100));
    }

    #[test]
    fn test_refunds_reduce_spending_when_not_excluded() {
        let transactions = vec![receipt("r1", "groceries", 150), receipt("f1", "groceries", -40)];
        let report = BudgetActualsReport::generate(&config(), march(), &transactions, &[]);
        assert_eq!(
            report.category(BudgetCategory::Groceries).unwrap().spent,
            Money::from_dollars(110)
        );
        assert!(report.total_income.is_zero());
    }

    #[test]
    fn test_excluded_ids_and_month_filter() {
        let mut config = config();
        config.exclude_id("r2");
        let mut april = receipt("r3", "groceries", 999);
        april.date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

        let transactions = vec![receipt("r1", "groceries", 10), receipt("r2", "groceries", 20), april];
        let report = BudgetActualsReport::generate(&config, march(), &transactions, &[]);
        assert_eq!(report.total_spent, Money::from_dollars(10));
        assert_eq!(report.excluded_count, 1);
    }

    #[test]
    fn test_month_override_and_income() {
        let mut config = config();
        config.upsert_month_cap(march(), BudgetCategory::Groceries, Money::from_dollars(600));
        let paychecks = vec![
            PaycheckEvent::new(date(7), Money::from_dollars(1500)),
            PaycheckEvent::new(date(21), Money::from_dollars(1500)),
            PaycheckEvent::new(NaiveDate::from_ymd_opt(2025, 4, 4).unwrap(), Money::from_dollars(1500)),
        ];
        let report = BudgetActualsReport::generate(&config, march(), &[], &paychecks);
        assert_eq!(
            report.category(BudgetCategory::Groceries).unwrap().assigned,
            Money::from_dollars(600)
        );
        assert_eq!(report.total_income, Money::from_dollars(3000));
    }

    #[test]
    fn test_format_terminal() {
        let report = BudgetActualsReport::generate(&config(), march(), &[receipt("r1", "dining", 150)], &[]);
        let output = report.format_terminal();
        assert!(output.contains("Budget Actuals: 2025-03"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains(" !"));
    }
}
