//! Period segmentation.
//!
//! Splits an observed date range into consecutive, non-overlapping
//! [`Period`]s of [`PERIOD_LENGTH_DAYS`] days, each starting on a Monday.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{PERIOD_LENGTH_DAYS, Period};

/// Returns the Monday on or before `date`.
pub fn monday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Tiles `[min_date, max_date]` with 14-day periods.
///
/// The first period starts on the Monday on or before `min_date`; periods
/// are emitted until one covers `max_date`. Returns an empty vector when
/// `max_date < min_date`.
///
/// # Example
///
/// ```
/// use timeclock_engine::analysis::segment_periods;
/// use chrono::NaiveDate;
///
/// let min = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let max = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
/// let periods = segment_periods(min, max);
///
/// assert_eq!(periods.len(), 2);
/// assert_eq!(periods[0].start_date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
/// ```
pub fn segment_periods(min_date: NaiveDate, max_date: NaiveDate) -> Vec<Period> {
    let mut periods = Vec::new();
    if max_date < min_date {
        return periods;
    }

    let mut cursor = monday_on_or_before(min_date);
    while cursor <= max_date {
        periods.push(Period::starting(cursor));
        cursor += Duration::days(PERIOD_LENGTH_DAYS);
    }
    periods
}

/// Tiles the span of the given dates; empty input yields no periods.
pub fn segment_observed<I>(dates: I) -> Vec<Period>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
    for date in dates {
        bounds = Some(match bounds {
            None => (date, date),
            Some((min, max)) => (min.min(date), max.max(date)),
        });
    }

    match bounds {
        Some((min, max)) => segment_periods(min, max),
        None => Vec::new(),
    }
}
