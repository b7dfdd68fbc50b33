//! Period arithmetic shared by every schedule in the planner
//!
//! All functions take a date and return a new one. Month-based steps clamp
//! the day to the end of the target month (Jan 31 + 1 month = Feb 28/29),
//! so advancing never spills into the following month.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::pay_schedule::DEFAULT_SEMIMONTHLY_DAYS;
use crate::models::Frequency;

/// Number of days in a calendar month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// The date in `year`/`month` for `day`, clamped to the month's last day
pub fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Shift by a signed number of months, clamping the day of month
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    clamp_day(year, month, date.day())
}

/// Signed count of calendar-month boundaries from `from` to `to`
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32
}

/// Advance `date` by `n` periods of `frequency` (negative `n` goes back)
///
/// Semimonthly steps move along the 1st/15th grid.
pub fn advance_period(date: NaiveDate, frequency: Frequency, n: i32) -> NaiveDate {
    if let Some(days) = frequency.day_step() {
        return date + Duration::days(days * n as i64);
    }
    if let Some(step) = frequency.month_step() {
        return add_months(date, step * n);
    }
    advance_semimonthly(date, DEFAULT_SEMIMONTHLY_DAYS, n)
}

/// Move `n` half-month slots along the grid formed by two anchor days
pub fn advance_semimonthly(date: NaiveDate, anchors: [u32; 2], n: i32) -> NaiveDate {
    let [first, second] = sorted(anchors);
    let month_index = date.year() * 12 + date.month0() as i32;

    // Slot index counts anchor dates: two per month.
    let slot = if date >= clamp_day(date.year(), date.month(), second) {
        month_index * 2 + 1
    } else if date >= clamp_day(date.year(), date.month(), first) {
        month_index * 2
    } else {
        month_index * 2 - 1
    };

    slot_date(slot + n, first, second)
}

/// Earliest semimonthly pay date on or after `reference`
///
/// Candidates are anchor 1 and anchor 2 in the reference month and anchor 1
/// of the next month; anchors default to the 1st and 15th.
pub fn next_semimonthly_on_or_after(reference: NaiveDate, anchors: Option<[u32; 2]>) -> NaiveDate {
    let [first, second] = sorted(anchors.unwrap_or(DEFAULT_SEMIMONTHLY_DAYS));
    let next_month = add_months(clamp_day(reference.year(), reference.month(), 1), 1);

    [
        clamp_day(reference.year(), reference.month(), first),
        clamp_day(reference.year(), reference.month(), second),
        clamp_day(next_month.year(), next_month.month(), first),
    ]
    .into_iter()
    .find(|candidate| *candidate >= reference)
    .unwrap_or_else(|| clamp_day(next_month.year(), next_month.month(), first))
}

/// First date of the series `anchor + k periods` (any integer `k`) that is on
/// or after `reference`
///
/// Month-based series are projected from the anchor each time, so a
/// 31st-of-month anchor lands on the 31st whenever the month has one.
pub fn next_on_or_after(reference: NaiveDate, frequency: Frequency, anchor: NaiveDate) -> NaiveDate {
    if let Some(days) = frequency.day_step() {
        let diff = (reference - anchor).num_days();
        let steps = diff.div_euclid(days) + i64::from(diff.rem_euclid(days) != 0);
        return anchor + Duration::days(steps * days);
    }

    if let Some(step) = frequency.month_step() {
        let mut k = months_between(anchor, reference).div_euclid(step);
        // The month estimate is at most one step early.
        while add_months(anchor, step * k) < reference {
            k += 1;
        }
        while add_months(anchor, step * (k - 1)) >= reference {
            k -= 1;
        }
        return add_months(anchor, step * k);
    }

    let day = anchor.day();
    let anchors = if day <= 15 { [day, day + 15] } else { [day - 15, day] };
    next_semimonthly_on_or_after(reference, Some(anchors))
}

fn sorted(anchors: [u32; 2]) -> [u32; 2] {
    let [a, b] = anchors;
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}

fn slot_date(slot: i32, first: u32, second: u32) -> NaiveDate {
    let month_index = slot.div_euclid(2);
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    let day = if slot.rem_euclid(2) == 0 { first } else { second };
    clamp_day(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_month_end_clamping() {
        assert_eq!(advance_period(date(2024, 1, 31), Frequency::Monthly, 1), date(2024, 2, 29));
        assert_eq!(advance_period(date(2023, 1, 31), Frequency::Monthly, 1), date(2023, 2, 28));
        assert_eq!(advance_period(date(2024, 8, 31), Frequency::Quarterly, 1), date(2024, 11, 30));
        assert_eq!(advance_period(date(2024, 2, 29), Frequency::Annual, 1), date(2025, 2, 28));
        assert_eq!(advance_period(date(2024, 3, 31), Frequency::Biannual, 1), date(2024, 9, 30));
    }

    #[test]
    fn test_repeated_monthly_advance_never_overflows() {
        let mut current = date(2024, 1, 31);
        for _ in 0..24 {
            let next = advance_period(current, Frequency::Monthly, 1);
            assert_eq!(months_between(current, next), 1);
            current = next;
        }
    }

    #[test]
    fn test_day_based_and_negative_steps() {
        assert_eq!(advance_period(date(2024, 1, 5), Frequency::Weekly, 2), date(2024, 1, 19));
        assert_eq!(advance_period(date(2024, 1, 5), Frequency::Biweekly, 1), date(2024, 1, 19));
        assert_eq!(advance_period(date(2024, 1, 5), Frequency::Biweekly, -1), date(2023, 12, 22));
        assert_eq!(advance_period(date(2024, 3, 31), Frequency::Monthly, -1), date(2024, 2, 29));
    }

    #[test]
    fn test_semimonthly_grid() {
        assert_eq!(advance_period(date(2024, 1, 1), Frequency::Semimonthly, 1), date(2024, 1, 15));
        assert_eq!(advance_period(date(2024, 1, 15), Frequency::Semimonthly, 1), date(2024, 2, 1));
        assert_eq!(advance_period(date(2024, 1, 20), Frequency::Semimonthly, 1), date(2024, 2, 1));
        assert_eq!(advance_period(date(2024, 12, 15), Frequency::Semimonthly, 1), date(2025, 1, 1));
        assert_eq!(advance_period(date(2024, 1, 1), Frequency::Semimonthly, -1), date(2023, 12, 15));
        assert_eq!(advance_semimonthly(date(2024, 2, 10), [10, 31], 1), date(2024, 2, 29));
    }

    #[test]
    fn test_next_semimonthly_on_or_after() {
        assert_eq!(next_semimonthly_on_or_after(date(2024, 1, 20), None), date(2024, 2, 1));
        assert_eq!(next_semimonthly_on_or_after(date(2024, 1, 15), None), date(2024, 1, 15));
        assert_eq!(next_semimonthly_on_or_after(date(2024, 1, 2), Some([15, 1])), date(2024, 1, 15));
        assert_eq!(next_semimonthly_on_or_after(date(2024, 2, 29), Some([5, 31])), date(2024, 2, 29));
        assert_eq!(next_semimonthly_on_or_after(date(2024, 12, 31), None), date(2025, 1, 1));
    }

    #[test]
    fn test_next_on_or_after_day_based() {
        let anchor = date(2024, 1, 5);
        assert_eq!(next_on_or_after(date(2024, 1, 5), Frequency::Biweekly, anchor), anchor);
        assert_eq!(next_on_or_after(date(2024, 1, 6), Frequency::Biweekly, anchor), date(2024, 1, 19));
        // Anchor in the future still yields the earliest matching occurrence.
        assert_eq!(next_on_or_after(date(2023, 12, 20), Frequency::Weekly, anchor), date(2023, 12, 22));
    }

    #[test]
    fn test_next_on_or_after_month_based() {
        let anchor = date(2024, 1, 31);
        assert_eq!(next_on_or_after(date(2024, 2, 10), Frequency::Monthly, anchor), date(2024, 2, 29));
        assert_eq!(next_on_or_after(date(2024, 3, 1), Frequency::Monthly, anchor), date(2024, 3, 31));
        assert_eq!(next_on_or_after(date(2024, 2, 1), Frequency::Quarterly, anchor), date(2024, 4, 30));
        assert_eq!(next_on_or_after(date(2023, 6, 1), Frequency::Annual, anchor), date(2024, 1, 31));
    }
}
