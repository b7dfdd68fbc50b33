//! Recurring bill cadence
//!
//! Decides which months a bill falls in, projects concrete due dates, and
//! advances a bill to its next period when it is paid.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use super::date_cursor::{add_months, advance_period, clamp_day, next_on_or_after};
use crate::models::{Frequency, HistoricalPayment, Money, MonthKey, RecurringBill};

/// Whether the bill has a due date in `month`
///
/// Quarterly bills fall every third month counted from the start month,
/// biannual bills in the start month and six months later, annual bills in
/// the start month only.
pub fn is_due_in_month(bill: &RecurringBill, month: MonthKey) -> bool {
    let current = month.month() as i32;
    let start = bill.effective_start_month() as i32;
    let offset = (current - start + 12) % 12;

    match bill.frequency {
        Frequency::Monthly => true,
        Frequency::Quarterly => offset % 3 == 0,
        Frequency::Biannual => offset % 6 == 0,
        Frequency::Annual => offset == 0,
        // Day-based cadences recur at least once in every month.
        Frequency::Weekly | Frequency::Biweekly | Frequency::Semimonthly => true,
    }
}

/// The bill's (first) due date inside `month`, if it is due that month
pub fn due_date_in_month(bill: &RecurringBill, month: MonthKey) -> Option<NaiveDate> {
    if !is_due_in_month(bill, month) {
        return None;
    }
    match bill.frequency {
        Frequency::Weekly | Frequency::Biweekly => {
            let first = next_on_or_after(month.first_day(), bill.frequency, series_anchor(bill, month.first_day()));
            month.contains(first).then_some(first)
        }
        _ => Some(clamp_day(month.year(), month.month(), bill.due_day)),
    }
}

/// Earliest due date on or after `reference`
pub fn next_due_on_or_after(bill: &RecurringBill, reference: NaiveDate) -> NaiveDate {
    if matches!(bill.frequency, Frequency::Weekly | Frequency::Biweekly) {
        return next_on_or_after(reference, bill.frequency, series_anchor(bill, reference));
    }

    let mut month = MonthKey::of(reference);
    // Every month-based cadence repeats within twelve months.
    for _ in 0..=12 {
        if is_due_in_month(bill, month) {
            let due = clamp_day(month.year(), month.month(), bill.due_day);
            if due >= reference {
                return due;
            }
        }
        month = month.next();
    }
    clamp_day(month.year(), month.month(), bill.due_day)
}

/// Due date of the bill for a planning window starting at `window_start`
///
/// A bill already paid ahead (next due date after the window start) is
/// projected from its stored next due date instead.
pub fn project_into_window(bill: &RecurringBill, window_start: NaiveDate) -> NaiveDate {
    let reference = match bill.next_due_date {
        Some(next) if next > window_start => next,
        _ => window_start,
    };
    next_due_on_or_after(bill, reference)
}

/// All due dates in `start..=end`
pub fn occurrences_between(bill: &RecurringBill, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        let due = next_due_on_or_after(bill, cursor);
        if due > end {
            break;
        }
        dates.push(due);
        cursor = due + Duration::days(1);
    }
    dates
}

/// The due date one period after `current`
///
/// Month-based cadences snap back to the bill's due day, so a bill due on the
/// 31st returns to the 31st after passing through a short month.
pub fn following_due_date(bill: &RecurringBill, current: NaiveDate) -> NaiveDate {
    match bill.frequency.month_step() {
        Some(step) => {
            let month = add_months(clamp_day(current.year(), current.month(), 1), step);
            clamp_day(month.year(), month.month(), bill.due_day)
        }
        None => advance_period(current, bill.frequency, 1),
    }
}

/// Toggle the paid state of a recurring bill
///
/// Paying an unpaid bill moves its next due date forward exactly one period
/// and leaves it unpaid for that new period. A bill stored as paid is simply
/// cleared.
pub fn toggle_paid(bill: &RecurringBill, paid_on: NaiveDate) -> RecurringBill {
    let mut next = bill.clone();
    if bill.paid {
        next.paid = false;
        return next;
    }

    let current = bill
        .next_due_date
        .unwrap_or_else(|| next_due_on_or_after(bill, paid_on));
    let advanced = following_due_date(bill, current);
    debug!(bill = %bill.name, from = %current, to = %advanced, "advanced recurring bill");

    next.next_due_date = Some(advanced);
    next.paid = false;
    next.last_paid_date = Some(paid_on);
    next
}

/// Pay a bill with a known amount: record it in the history, then advance
pub fn pay_with_amount(
    bill: &RecurringBill,
    paid_on: NaiveDate,
    amount: Money,
    history_cap: usize,
) -> RecurringBill {
    let mut recorded = bill.clone();
    recorded.paid = false;
    recorded.record_payment(
        HistoricalPayment {
            date: paid_on,
            amount: amount.non_negative(),
        },
        history_cap,
    );
    toggle_paid(&recorded, paid_on)
}

/// Resolve the first due date for a bill that has never had one stored
pub fn ensure_next_due(bill: &RecurringBill, today: NaiveDate) -> RecurringBill {
    let mut next = bill.clone();
    if next.next_due_date.is_none() {
        next.next_due_date = Some(next_due_on_or_after(bill, today));
    }
    next
}

fn series_anchor(bill: &RecurringBill, reference: NaiveDate) -> NaiveDate {
    bill.next_due_date
        .unwrap_or_else(|| clamp_day(reference.year(), reference.month(), bill.due_day))
}
