//! Travel periods and day counting.
//!
//! Travellers describe how long they need coverage either as a plain number
//! of days or as an inclusive date range. For a range, weekends can be left
//! out for commuters who only travel Monday to Friday.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;

/// Which days of a date range need coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPolicy {
    /// Every calendar day
    #[default]
    AllDays,
    /// Monday to Friday only
    WeekdaysOnly,
}

impl DayPolicy {
    /// Returns true if a day with this weekday needs coverage.
    pub fn includes(&self, weekday: Weekday) -> bool {
        match self {
            DayPolicy::AllDays => true,
            DayPolicy::WeekdaysOnly => !matches!(weekday, Weekday::Sat | Weekday::Sun),
        }
    }
}

/// A user-specified travel period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelPeriod {
    /// A direct number of travel days.
    Days(u32),
    /// An inclusive date range.
    Range {
        start: NaiveDate,
        end: NaiveDate,
        policy: DayPolicy,
    },
}

impl TravelPeriod {
    /// Resolve the period into the number of days that need coverage.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use fare_server::domain::{DayPolicy, TravelPeriod};
    ///
    /// // Friday 15 March to Monday 18 March 2024
    /// let start = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
    ///
    /// let all = TravelPeriod::Range { start, end, policy: DayPolicy::AllDays };
    /// assert_eq!(all.resolve().unwrap(), 4);
    ///
    /// let weekdays = TravelPeriod::Range { start, end, policy: DayPolicy::WeekdaysOnly };
    /// assert_eq!(weekdays.resolve().unwrap(), 2);
    /// ```
    pub fn resolve(&self) -> Result<u32, PeriodError> {
        let days = match *self {
            TravelPeriod::Days(n) => n,
            TravelPeriod::Range { start, end, policy } => count_days(start, end, policy)?,
        };

        if days == 0 {
            return Err(PeriodError::NoTravelDays);
        }
        Ok(days)
    }
}

/// Count the days in `start..=end` that `policy` includes.
fn count_days(start: NaiveDate, end: NaiveDate, policy: DayPolicy) -> Result<u32, PeriodError> {
    if end < start {
        return Err(PeriodError::EndBeforeStart { start, end });
    }

    let span = end.signed_duration_since(start).num_days() + 1;
    let span = u32::try_from(span).map_err(|_| PeriodError::TooLong)?;

    let days = match policy {
        DayPolicy::AllDays => span,
        DayPolicy::WeekdaysOnly => {
            // Whole weeks contribute five weekdays each; walk the remainder.
            let full_weeks = span / 7;
            let remainder = span % 7;
            let mut count = full_weeks * 5;
            let mut day = start.weekday();
            for _ in 0..remainder {
                if policy.includes(day) {
                    count += 1;
                }
                day = day.succ();
            }
            count
        }
    };

    Ok(days)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Weekday count matches a day-by-day walk
        #[test]
        fn weekday_count_matches_naive(offset in 0i64..3000, len in 0i64..400) {
            let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(offset);
            let end = start + chrono::Duration::days(len);

            let naive = start
                .iter_days()
                .take_while(|d| *d <= end)
                .filter(|d| DayPolicy::WeekdaysOnly.includes(d.weekday()))
                .count() as u32;

            let counted = count_days(start, end, DayPolicy::WeekdaysOnly).unwrap();
            prop_assert_eq!(counted, naive);
        }

        /// Weekday-only never exceeds all-days
        #[test]
        fn weekdays_bounded_by_all_days(offset in 0i64..3000, len in 0i64..400) {
            let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(offset);
            let end = start + chrono::Duration::days(len);

            let all = count_days(start, end, DayPolicy::AllDays).unwrap();
            let weekdays = count_days(start, end, DayPolicy::WeekdaysOnly).unwrap();
            prop_assert!(weekdays <= all);
            prop_assert_eq!(all as i64, len + 1);
        }
    }
}
