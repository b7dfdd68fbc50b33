//! Stored record shapes
//!
//! The state file is meant to survive hand edits and older versions, so
//! records are loose: every field has a default, amounts may be numbers or
//! strings, and frequencies are free text. [`normalize`] turns them into
//! typed models and reports every repair as a [`PlannerFlag`].
//!
//! Amounts are stored in dollars.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use crate::models::{
    AssetId, AssetLoan, AssignmentPreference, BillId, BudgetCategory, BudgetConfig,
    BudgetExclusions, Debt, DebtId, Frequency, HistoricalPayment, Money, MonthKey, OneTimeBill,
    OneTimeBillId, PayCadence, PaySchedule, PlannerFlag, RecurringBill, SourceKind,
    TransactionLike,
};
use crate::state::PlannerState;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateRecord {
    pub schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_schedule: Option<PayScheduleRecord>,
    pub bills: Vec<BillRecord>,
    pub one_time_bills: Vec<OneTimeBillRecord>,
    pub assets: Vec<AssetRecord>,
    pub debts: Vec<DebtRecord>,
    pub budget: BudgetRecord,
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayScheduleRecord {
    pub frequency: Option<String>,
    pub pay_amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_pay_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semimonthly_days: Option<[u32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentRecord {
    pub date: Option<NaiveDate>,
    pub amount: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillRecord {
    pub id: Option<BillId>,
    pub name: String,
    #[serde(alias = "amount")]
    pub amount_estimate: Option<Value>,
    pub due_day: Option<u32>,
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u32>,
    pub category: Option<String>,
    pub autopay: bool,
    pub assignment_preference: Option<String>,
    pub variable: bool,
    pub historical_payments: Vec<PaymentRecord>,
    pub paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneTimeBillRecord {
    pub id: Option<OneTimeBillId>,
    pub name: String,
    pub amount: Option<Value>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetRecord {
    pub id: Option<AssetId>,
    pub name: String,
    pub loan_amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Value>,
    pub interest_rate: Option<Value>,
    pub payment_amount: Option<Value>,
    pub payment_frequency: Option<String>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtRecord {
    pub id: Option<DebtId>,
    pub name: String,
    pub balance: Option<Value>,
    pub rate: Option<Value>,
    pub payment: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_term: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetRecord {
    pub default_caps: BTreeMap<String, Value>,
    pub monthly_caps: BTreeMap<String, BTreeMap<String, Value>>,
    pub exclusions: BudgetExclusions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRecord {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub category: String,
    pub amount: Option<Value>,
    pub source_kind: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Collects flags while records are converted
struct Normalizer {
    today: NaiveDate,
    flags: Vec<PlannerFlag>,
}

impl Normalizer {
    fn amount(&mut self, record: &str, field: &str, raw: Option<&Value>) -> Money {
        match raw.and_then(parse_amount) {
            Some(amount) if !amount.is_negative() => amount,
            _ => {
                self.flags.push(PlannerFlag::invalid_amount(record, field));
                Money::zero()
            }
        }
    }

    /// An amount that may legitimately be absent
    fn optional_amount(&mut self, record: &str, field: &str, raw: Option<&Value>) -> Option<Money> {
        match raw {
            None | Some(Value::Null) => None,
            Some(value) => Some(self.amount(record, field, Some(value))),
        }
    }

    fn rate(&mut self, record: &str, field: &str, raw: Option<&Value>) -> f64 {
        let rate = match raw {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
            _ => None,
        };
        match rate {
            Some(rate) if rate.is_finite() && rate >= 0.0 => rate,
            _ => {
                self.flags.push(PlannerFlag::invalid_amount(record, field));
                0.0
            }
        }
    }

    fn frequency(&mut self, record: &str, raw: Option<&str>, allowed: fn(&Frequency) -> bool) -> Frequency {
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            return Frequency::Monthly;
        };
        match Frequency::parse(raw).filter(allowed) {
            Some(frequency) => frequency,
            None => {
                self.flags.push(PlannerFlag::unsupported_frequency(record, raw));
                Frequency::Monthly
            }
        }
    }

    fn pay_schedule(&mut self, record: PayScheduleRecord) -> PaySchedule {
        let label = "pay schedule";
        let pay_amount = self.amount(label, "pay_amount", record.pay_amount.as_ref());
        let frequency = self.frequency(label, record.frequency.as_deref(), Frequency::is_pay_frequency);
        let next_pay_date = record.next_pay_date.unwrap_or(self.today);

        let cadence = match frequency {
            Frequency::Weekly => PayCadence::Weekly { next_pay_date },
            Frequency::Biweekly => PayCadence::Biweekly { next_pay_date },
            Frequency::Semimonthly => PayCadence::Semimonthly {
                anchor_days: record.semimonthly_days.map(|days| days.map(|d| d.clamp(1, 31))),
            },
            _ => PayCadence::Monthly {
                day_of_month: record
                    .day_of_month
                    .unwrap_or_else(|| next_pay_date.day())
                    .clamp(1, 31),
            },
        };
        PaySchedule::new(pay_amount, cadence)
    }

    fn bill(&mut self, record: BillRecord) -> RecurringBill {
        let name = display_name(record.name, "Unnamed bill");
        let frequency = self.frequency(&name, record.frequency.as_deref(), Frequency::is_bill_frequency);
        let amount_estimate = self.amount(&name, "amount", record.amount_estimate.as_ref());
        let due_day = record
            .due_day
            .or_else(|| record.next_due_date.map(|d| d.day()))
            .unwrap_or(1)
            .clamp(1, 31);

        let historical_payments = record
            .historical_payments
            .into_iter()
            .filter_map(|payment| {
                let date = payment.date?;
                let amount = self.amount(&name, "payment", payment.amount.as_ref());
                Some(HistoricalPayment { date, amount })
            })
            .collect();

        let mut bill = RecurringBill {
            id: record.id.unwrap_or_default(),
            amount_estimate,
            due_day,
            frequency,
            start_month: record.start_month.map(|m| m.clamp(1, 12)),
            category: record
                .category
                .as_deref()
                .map(BudgetCategory::parse_or_other)
                .unwrap_or_default(),
            autopay: record.autopay,
            assignment_preference: record
                .assignment_preference
                .as_deref()
                .and_then(AssignmentPreference::parse)
                .unwrap_or_default(),
            variable: record.variable,
            historical_payments,
            paid: record.paid,
            next_due_date: record.next_due_date,
            last_paid_date: record.last_paid_date,
            name,
        };
        bill.historical_payments.sort_by_key(|p| p.date);
        bill.recompute_estimate();
        bill
    }

    fn one_time_bill(&mut self, record: OneTimeBillRecord) -> OneTimeBill {
        let name = display_name(record.name, "Unnamed bill");
        OneTimeBill {
            id: record.id.unwrap_or_default(),
            amount: self.amount(&name, "amount", record.amount.as_ref()),
            due_date: record.due_date.unwrap_or(self.today),
            category: record
                .category
                .as_deref()
                .map(BudgetCategory::parse_or_other)
                .unwrap_or_default(),
            paid: record.paid,
            paid_date: record.paid_date,
            name,
        }
    }

    fn asset(&mut self, record: AssetRecord) -> AssetLoan {
        let name = display_name(record.name, "Unnamed loan");
        AssetLoan {
            id: record.id.unwrap_or_default(),
            loan_amount: self.amount(&name, "loan_amount", record.loan_amount.as_ref()),
            current_balance: self.optional_amount(&name, "current_balance", record.current_balance.as_ref()),
            interest_rate: self.rate(&name, "interest_rate", record.interest_rate.as_ref()),
            payment_amount: self.amount(&name, "payment_amount", record.payment_amount.as_ref()),
            payment_frequency: self.frequency(&name, record.payment_frequency.as_deref(), |_| true),
            start_date: record.start_date.unwrap_or(self.today),
            name,
        }
    }

    fn debt(&mut self, record: DebtRecord) -> Debt {
        let name = display_name(record.name, "Unnamed debt");
        Debt {
            id: record.id.unwrap_or_default(),
            balance: self.amount(&name, "balance", record.balance.as_ref()),
            rate: self.rate(&name, "rate", record.rate.as_ref()),
            payment: self.amount(&name, "payment", record.payment.as_ref()),
            loan_amount: self.optional_amount(&name, "loan_amount", record.loan_amount.as_ref()),
            loan_term: record.loan_term,
            start_date: record.start_date,
            name,
        }
    }

    fn budget(&mut self, record: BudgetRecord) -> BudgetConfig {
        let mut config = BudgetConfig {
            exclusions: record.exclusions,
            ..Default::default()
        };
        for (label, raw) in &record.default_caps {
            let amount = self.amount("budget", label, Some(raw));
            config.set_default_cap(BudgetCategory::parse_or_other(label), amount);
        }
        for (key, caps) in &record.monthly_caps {
            let Ok(month) = MonthKey::parse(key) else {
                warn!(month = %key, "skipping budget override with an invalid month key");
                continue;
            };
            for (label, raw) in caps {
                let amount = self.amount("budget", label, Some(raw));
                config.upsert_month_cap(month, BudgetCategory::parse_or_other(label), amount);
            }
        }
        config
    }

    fn transaction(&mut self, record: TransactionRecord) -> TransactionLike {
        let label = if record.name.is_empty() { record.id.clone() } else { record.name.clone() };
        // Credits are negative, so only a missing or unreadable amount is invalid.
        let amount = match record.amount.as_ref().and_then(parse_amount) {
            Some(amount) => amount,
            None => {
                self.flags.push(PlannerFlag::invalid_amount(&label, "amount"));
                Money::zero()
            }
        };
        let source_kind = match record.source_kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("bill") => SourceKind::Bill,
            Some("synced") | Some("plaid") | Some("bank") => SourceKind::Synced,
            _ => SourceKind::Receipt,
        };
        TransactionLike {
            id: record.id,
            date: record.date.unwrap_or(self.today),
            category: record.category,
            amount,
            source_kind,
            name: record.name,
            kind: record.kind,
        }
    }
}

/// Convert stored records to a typed state, raising flags for every repair
///
/// `today` fills dates a record is missing. Never fails.
pub fn normalize(record: StateRecord, today: NaiveDate) -> PlannerState {
    let mut normalizer = Normalizer {
        today,
        flags: Vec::new(),
    };

    let pay_schedule = record.pay_schedule.map(|r| normalizer.pay_schedule(r));
    let bills = record.bills.into_iter().map(|r| normalizer.bill(r)).collect();
    let one_time_bills = record
        .one_time_bills
        .into_iter()
        .map(|r| normalizer.one_time_bill(r))
        .collect();
    let assets = record.assets.into_iter().map(|r| normalizer.asset(r)).collect();
    let debts = record.debts.into_iter().map(|r| normalizer.debt(r)).collect();
    let budget = normalizer.budget(record.budget);
    let transactions = record
        .transactions
        .into_iter()
        .map(|r| normalizer.transaction(r))
        .collect();

    if !normalizer.flags.is_empty() {
        warn!(count = normalizer.flags.len(), "stored records needed repair");
    }

    PlannerState {
        pay_schedule,
        bills,
        one_time_bills,
        assets,
        debts,
        budget,
        transactions,
        flags: normalizer.flags,
    }
}

impl From<&PlannerState> for StateRecord {
    fn from(state: &PlannerState) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            pay_schedule: state.pay_schedule.as_ref().map(PayScheduleRecord::from),
            bills: state.bills.iter().map(BillRecord::from).collect(),
            one_time_bills: state.one_time_bills.iter().map(OneTimeBillRecord::from).collect(),
            assets: state.assets.iter().map(AssetRecord::from).collect(),
            debts: state.debts.iter().map(DebtRecord::from).collect(),
            budget: BudgetRecord::from(&state.budget),
            transactions: state.transactions.iter().map(TransactionRecord::from).collect(),
        }
    }
}

impl From<&PaySchedule> for PayScheduleRecord {
    fn from(schedule: &PaySchedule) -> Self {
        let mut record = Self {
            frequency: Some(schedule.frequency().to_string()),
            pay_amount: Some(money_value(schedule.pay_amount)),
            ..Default::default()
        };
        match &schedule.cadence {
            PayCadence::Weekly { next_pay_date } | PayCadence::Biweekly { next_pay_date } => {
                record.next_pay_date = Some(*next_pay_date)
            }
            PayCadence::Semimonthly { anchor_days } => record.semimonthly_days = *anchor_days,
            PayCadence::Monthly { day_of_month } => record.day_of_month = Some(*day_of_month),
        }
        record
    }
}

impl From<&RecurringBill> for BillRecord {
    fn from(bill: &RecurringBill) -> Self {
        Self {
            id: Some(bill.id),
            name: bill.name.clone(),
            amount_estimate: Some(money_value(bill.amount_estimate)),
            due_day: Some(bill.due_day),
            frequency: Some(bill.frequency.to_string()),
            start_month: bill.start_month,
            category: Some(bill.category.to_string()),
            autopay: bill.autopay,
            assignment_preference: Some(bill.assignment_preference.to_string()),
            variable: bill.variable,
            historical_payments: bill
                .historical_payments
                .iter()
                .map(|p| PaymentRecord {
                    date: Some(p.date),
                    amount: Some(money_value(p.amount)),
                })
                .collect(),
            paid: bill.paid,
            next_due_date: bill.next_due_date,
            last_paid_date: bill.last_paid_date,
        }
    }
}

impl From<&OneTimeBill> for OneTimeBillRecord {
    fn from(bill: &OneTimeBill) -> Self {
        Self {
            id: Some(bill.id),
            name: bill.name.clone(),
            amount: Some(money_value(bill.amount)),
            due_date: Some(bill.due_date),
            category: Some(bill.category.to_string()),
            paid: bill.paid,
            paid_date: bill.paid_date,
        }
    }
}

impl From<&AssetLoan> for AssetRecord {
    fn from(loan: &AssetLoan) -> Self {
        Self {
            id: Some(loan.id),
            name: loan.name.clone(),
            loan_amount: Some(money_value(loan.loan_amount)),
            current_balance: loan.current_balance.map(money_value),
            interest_rate: Some(Value::from(loan.interest_rate)),
            payment_amount: Some(money_value(loan.payment_amount)),
            payment_frequency: Some(loan.payment_frequency.to_string()),
            start_date: Some(loan.start_date),
        }
    }
}

impl From<&Debt> for DebtRecord {
    fn from(debt: &Debt) -> Self {
        Self {
            id: Some(debt.id),
            name: debt.name.clone(),
            balance: Some(money_value(debt.balance)),
            rate: Some(Value::from(debt.rate)),
            payment: Some(money_value(debt.payment)),
            loan_amount: debt.loan_amount.map(money_value),
            loan_term: debt.loan_term,
            start_date: debt.start_date,
        }
    }
}

impl From<&BudgetConfig> for BudgetRecord {
    fn from(config: &BudgetConfig) -> Self {
        let caps = |caps: &crate::models::CategoryCaps| {
            caps.iter()
                .map(|(category, amount)| (category.to_string(), money_value(*amount)))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            default_caps: caps(&config.default_caps),
            monthly_caps: config
                .monthly_caps
                .iter()
                .map(|(month, month_caps)| (month.to_string(), caps(month_caps)))
                .collect(),
            exclusions: config.exclusions.clone(),
        }
    }
}

impl From<&TransactionLike> for TransactionRecord {
    fn from(txn: &TransactionLike) -> Self {
        let source_kind = match txn.source_kind {
            SourceKind::Bill => "bill",
            SourceKind::Receipt => "receipt",
            SourceKind::Synced => "synced",
        };
        Self {
            id: txn.id.clone(),
            date: Some(txn.date),
            category: txn.category.clone(),
            amount: Some(money_value(txn.amount)),
            source_kind: Some(source_kind.to_string()),
            name: txn.name.clone(),
            kind: txn.kind.clone(),
        }
    }
}

/// Read a dollar amount from a JSON number or a money string
pub fn parse_amount(value: &Value) -> Option<Money> {
    match value {
        Value::Number(n) => n.as_f64().and_then(Money::from_dollars_f64),
        Value::String(s) => Money::parse(s).ok(),
        _ => None,
    }
}

fn money_value(amount: Money) -> Value {
    Value::from(amount.as_dollars_f64())
}

fn display_name(name: String, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn load(value: Value) -> PlannerState {
        let record: StateRecord = serde_json::from_value(value).unwrap();
        normalize(record, today())
    }

    #[test]
    fn test_empty_document_loads() {
        let state = load(json!({}));
        assert!(state.pay_schedule.is_none());
        assert!(state.bills.is_empty());
        assert!(state.flags.is_empty());
    }

    #[test]
    fn test_invalid_amounts_become_zero_with_flags() {
        let state = load(json!({
            "bills": [
                {"name": "Rent", "amount": "abc", "due_day": 1},
                {"name": "Gym", "due_day": 5},
                {"name": "Phone", "amount": "$80.25", "due_day": 12}
            ]
        }));
        assert!(state.bills[0].amount_estimate.is_zero());
        assert!(state.bills[1].amount_estimate.is_zero());
        assert_eq!(state.bills[2].amount_estimate, Money::from_cents(8_025));
        assert_eq!(
            state.flags,
            vec![
                PlannerFlag::invalid_amount("Rent", "amount"),
                PlannerFlag::invalid_amount("Gym", "amount"),
            ]
        );
    }

    #[test]
    fn test_unknown_frequency_falls_back_to_monthly() {
        let state = load(json!({
            "bills": [{"name": "Water", "amount": 40, "frequency": "hourly"}],
            "assets": [{"name": "Car", "loan_amount": 9000, "interest_rate": "5%",
                        "payment_amount": 250, "payment_frequency": "bi-weekly"}]
        }));
        assert_eq!(state.bills[0].frequency, Frequency::Monthly);
        assert_eq!(state.assets[0].payment_frequency, Frequency::Biweekly);
        assert!((state.assets[0].interest_rate - 5.0).abs() < 1e-9);
        assert_eq!(state.flags, vec![PlannerFlag::unsupported_frequency("Water", "hourly")]);
    }

    #[test]
    fn test_semimonthly_bill_is_not_a_bill_frequency() {
        let state = load(json!({"bills": [{"name": "Odd", "amount": 1, "frequency": "semimonthly"}]}));
        assert_eq!(state.bills[0].frequency, Frequency::Monthly);
        assert_eq!(state.flags.len(), 1);
    }

    #[test]
    fn test_pay_schedule_defaults() {
        let state = load(json!({"pay_schedule": {"frequency": "biweekly", "pay_amount": 1500}}));
        let schedule = state.pay_schedule.unwrap();
        assert_eq!(schedule.cadence, PayCadence::Biweekly { next_pay_date: today() });
        assert_eq!(schedule.pay_amount, Money::from_dollars(1500));

        let state = load(json!({"pay_schedule": {"frequency": "quarterly", "pay_amount": 1}}));
        assert_eq!(state.pay_schedule.unwrap().cadence, PayCadence::Monthly { day_of_month: 10 });
        assert_eq!(state.flags.len(), 1);
    }

    #[test]
    fn test_variable_bill_estimate_follows_history() {
        let state = load(json!({"bills": [{
            "name": "Electric", "amount": 50, "variable": true,
            "historical_payments": [
                {"date": "2023-12-12", "amount": 90},
                {"date": "2023-11-12", "amount": "110.00"}
            ]
        }]}));
        let bill = &state.bills[0];
        assert_eq!(bill.amount_estimate, Money::from_dollars(100));
        assert_eq!(bill.historical_payments[0].date, NaiveDate::from_ymd_opt(2023, 11, 12).unwrap());
    }

    #[test]
    fn test_budget_caps_and_bad_month_keys() {
        let state = load(json!({"budget": {
            "default_caps": {"groceries": 400, "restaurants": "150"},
            "monthly_caps": {"2024-02": {"groceries": 500}, "February": {"groceries": 1}},
            "exclusions": {"exclude_transfers": true}
        }}));
        let feb = MonthKey::new(2024, 2).unwrap();
        assert_eq!(state.budget.cap_for(feb, BudgetCategory::Groceries), Money::from_dollars(500));
        assert_eq!(
            state.budget.default_caps[&BudgetCategory::Dining],
            Money::from_dollars(150)
        );
        assert_eq!(state.budget.monthly_caps.len(), 1);
        assert!(state.budget.exclusions.exclude_transfers);
    }

    #[test]
    fn test_records_round_trip_through_state() {
        let state = PlannerState::default()
            .with_pay_schedule(PaySchedule::semimonthly(Money::from_cents(150_050), Some([5, 20])))
            .with_bill(RecurringBill::monthly("Rent", Money::from_dollars(1200), 1).with_autopay(true))
            .with_asset(
                AssetLoan::new(
                    "Car",
                    Money::from_dollars(9000),
                    4.5,
                    Money::from_dollars(250),
                    Frequency::Monthly,
                    today(),
                )
                .with_current_balance(Money::from_cents(812_345)),
            )
            .with_debt(Debt::new("Card", Money::from_dollars(3000), 19.99, Money::from_dollars(150)))
            .set_budget_cap(BudgetCategory::Dining, Money::from_dollars(120), MonthKey::new(2024, 1));

        let json = serde_json::to_string(&StateRecord::from(&state)).unwrap();
        let record: StateRecord = serde_json::from_str(&json).unwrap();
        let loaded = normalize(record, today());

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_transactions_keep_credits() {
        let state = load(json!({"transactions": [
            {"id": "t1", "date": "2024-01-05", "category": "groceries", "amount": -12.5, "source_kind": "synced"},
            {"id": "t2", "date": "2024-01-06", "amount": null}
        ]}));
        assert_eq!(state.transactions[0].amount, Money::from_cents(-1_250));
        assert_eq!(state.transactions[0].source_kind, SourceKind::Synced);
        assert_eq!(state.flags, vec![PlannerFlag::invalid_amount("t2", "amount")]);
    }
}
