//! Paycheck projection
//!
//! Turns a [`PaySchedule`] into concrete upcoming paychecks, never emitting a
//! date before the injected reference day.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::date_cursor::{
    add_months, advance_period, advance_semimonthly, clamp_day, next_on_or_after,
    next_semimonthly_on_or_after,
};
use crate::clock::Clock;
use crate::models::{MonthKey, PayCadence, PaySchedule, PaycheckEvent};

/// The next `count` paychecks on or after `today`, in date order
pub fn generate_paychecks(schedule: &PaySchedule, count: usize, today: NaiveDate) -> Vec<PaycheckEvent> {
    let dates: Vec<NaiveDate> = match &schedule.cadence {
        PayCadence::Weekly { next_pay_date } | PayCadence::Biweekly { next_pay_date } => {
            let frequency = schedule.frequency();
            let first = if *next_pay_date >= today {
                *next_pay_date
            } else {
                next_on_or_after(today, frequency, *next_pay_date)
            };
            (0..count)
                .map(|i| advance_period(first, frequency, i as i32))
                .collect()
        }
        PayCadence::Semimonthly { anchor_days } => {
            let anchors = schedule.cadence.semimonthly_days();
            let first = next_semimonthly_on_or_after(today, anchor_days.map(|_| anchors));
            (0..count)
                .map(|i| advance_semimonthly(first, anchors, i as i32))
                .collect()
        }
        PayCadence::Monthly { day_of_month } => {
            let this_month = clamp_day(today.year(), today.month(), *day_of_month);
            let start = if this_month >= today {
                this_month
            } else {
                let next = add_months(clamp_day(today.year(), today.month(), 1), 1);
                clamp_day(next.year(), next.month(), *day_of_month)
            };
            (0..count)
                .map(|i| {
                    let month = add_months(clamp_day(start.year(), start.month(), 1), i as i32);
                    clamp_day(month.year(), month.month(), *day_of_month)
                })
                .collect()
        }
    };

    debug!(
        frequency = %schedule.frequency(),
        count,
        first = ?dates.first(),
        "generated paychecks"
    );

    dates
        .into_iter()
        .map(|date| PaycheckEvent::new(date, schedule.pay_amount))
        .collect()
}

/// The next two paychecks, or `None` when no schedule is configured
pub fn next_two_paychecks(
    schedule: Option<&PaySchedule>,
    clock: &dyn Clock,
) -> Option<[PaycheckEvent; 2]> {
    let schedule = schedule?;
    let events = generate_paychecks(schedule, 2, clock.today());
    match events.as_slice() {
        [first, second] => Some([*first, *second]),
        _ => None,
    }
}

/// Paychecks falling inside `month`
///
/// Weekly and biweekly series extend backwards from the stored next pay
/// date, so paydays already behind it in the month still count.
pub fn paychecks_in_month(schedule: &PaySchedule, month: MonthKey) -> Vec<PaycheckEvent> {
    match &schedule.cadence {
        PayCadence::Weekly { next_pay_date } | PayCadence::Biweekly { next_pay_date } => {
            let frequency = schedule.frequency();
            let first = next_on_or_after(month.first_day(), frequency, *next_pay_date);
            (0..)
                .map(|i| advance_period(first, frequency, i))
                .take_while(|date| month.contains(*date))
                .map(|date| PaycheckEvent::new(date, schedule.pay_amount))
                .collect()
        }
        // Semimonthly and monthly pay land at most twice a month.
        _ => generate_paychecks(schedule, 2, month.first_day())
            .into_iter()
            .filter(|event| month.contains(event.date))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::Money;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dates(events: &[PaycheckEvent]) -> Vec<NaiveDate> {
        events.iter().map(|e| e.date).collect()
    }

    #[test]
    fn test_biweekly_from_future_anchor() {
        let schedule = PaySchedule::biweekly(Money::from_dollars(1000), date(2024, 1, 5));
        let events = generate_paychecks(&schedule, 3, date(2024, 1, 1));
        assert_eq!(dates(&events), vec![date(2024, 1, 5), date(2024, 1, 19), date(2024, 2, 2)]);
        assert!(events.iter().all(|e| e.amount == Money::from_dollars(1000)));
    }

    #[test]
    fn test_biweekly_skips_past_dates() {
        let schedule = PaySchedule::biweekly(Money::from_dollars(1000), date(2024, 1, 5));
        let events = generate_paychecks(&schedule, 2, date(2024, 2, 3));
        assert_eq!(dates(&events), vec![date(2024, 2, 16), date(2024, 3, 1)]);
    }

    #[test]
    fn test_weekly_on_anchor_day_is_included() {
        let schedule = PaySchedule::weekly(Money::from_dollars(500), date(2024, 1, 5));
        let events = generate_paychecks(&schedule, 2, date(2024, 1, 26));
        assert_eq!(dates(&events), vec![date(2024, 1, 26), date(2024, 2, 2)]);
    }

    #[test]
    fn test_semimonthly_default_anchors() {
        let schedule = PaySchedule::semimonthly(Money::from_dollars(1500), None);
        let events = generate_paychecks(&schedule, 4, date(2024, 1, 20));
        assert_eq!(
            dates(&events),
            vec![date(2024, 2, 1), date(2024, 2, 15), date(2024, 3, 1), date(2024, 3, 15)]
        );
    }

    #[test]
    fn test_semimonthly_custom_anchors_clamp() {
        let schedule = PaySchedule::semimonthly(Money::from_dollars(1500), Some([15, 31]));
        let events = generate_paychecks(&schedule, 3, date(2024, 2, 16));
        assert_eq!(dates(&events), vec![date(2024, 2, 29), date(2024, 3, 15), date(2024, 3, 31)]);
    }

    #[test]
    fn test_monthly_keeps_anchor_day() {
        let schedule = PaySchedule::monthly(Money::from_dollars(3000), 31);
        let events = generate_paychecks(&schedule, 3, date(2024, 1, 31));
        assert_eq!(dates(&events), vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31)]);

        let later = generate_paychecks(&schedule, 1, date(2024, 4, 1));
        assert_eq!(dates(&later), vec![date(2024, 4, 30)]);
    }

    #[test]
    fn test_never_before_today_and_sorted() {
        let today = date(2024, 5, 17);
        let schedules = [
            PaySchedule::weekly(Money::from_dollars(1), date(2023, 3, 3)),
            PaySchedule::biweekly(Money::from_dollars(1), date(2022, 11, 11)),
            PaySchedule::semimonthly(Money::from_dollars(1), Some([7, 22])),
            PaySchedule::monthly(Money::from_dollars(1), 10),
        ];
        for schedule in &schedules {
            let events = generate_paychecks(schedule, 8, today);
            assert_eq!(events.len(), 8);
            assert!(events.iter().all(|e| e.date >= today));
            assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
        }
    }

    #[test]
    fn test_next_two_without_schedule() {
        let clock = FixedClock::new(date(2024, 1, 1));
        assert!(next_two_paychecks(None, &clock).is_none());

        let schedule = PaySchedule::monthly(Money::from_dollars(3000), 1);
        let [first, second] = next_two_paychecks(Some(&schedule), &clock).unwrap();
        assert_eq!(first.date, date(2024, 1, 1));
        assert_eq!(second.date, date(2024, 2, 1));
    }

    #[test]
    fn test_paychecks_in_month() {
        let schedule = PaySchedule::weekly(Money::from_dollars(500), date(2024, 1, 5));
        let events = paychecks_in_month(&schedule, MonthKey::new(2024, 3).unwrap());
        assert_eq!(
            dates(&events),
            vec![date(2024, 3, 1), date(2024, 3, 8), date(2024, 3, 15), date(2024, 3, 22), date(2024, 3, 29)]
        );
    }

    #[test]
    fn test_paychecks_in_month_before_next_pay_date() {
        let schedule = PaySchedule::biweekly(Money::from_dollars(1000), date(2024, 3, 22));
        let events = paychecks_in_month(&schedule, MonthKey::new(2024, 3).unwrap());
        assert_eq!(dates(&events), vec![date(2024, 3, 8), date(2024, 3, 22)]);

        let earlier = paychecks_in_month(&schedule, MonthKey::new(2024, 2).unwrap());
        assert_eq!(dates(&earlier), vec![date(2024, 2, 9), date(2024, 2, 23)]);
    }

    #[test]
    fn test_paychecks_in_month_semimonthly_and_monthly() {
        let march = MonthKey::new(2024, 3).unwrap();
        let semimonthly = PaySchedule::semimonthly(Money::from_dollars(1500), None);
        assert_eq!(
            dates(&paychecks_in_month(&semimonthly, march)),
            vec![date(2024, 3, 1), date(2024, 3, 15)]
        );
        let monthly = PaySchedule::monthly(Money::from_dollars(3000), 31);
        assert_eq!(dates(&paychecks_in_month(&monthly, march)), vec![date(2024, 3, 31)]);
    }
}
