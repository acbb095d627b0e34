//! Reporting period model.
//!
//! This module contains the [`Period`] type: a fixed 14-day, Monday-aligned
//! window used to bucket punch history for scoring.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of calendar days covered by one reporting period.
pub const PERIOD_LENGTH_DAYS: i64 = 14;

/// A reporting period with its inclusive date range.
///
/// Equality, ordering and hashing are by `start_date`/`end_date` only. The
/// human label is derived on demand and never used as a key.
///
/// # Example
///
/// ```
/// use timeclock_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period::starting(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
///
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2024, 1, 21).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()));
/// assert_eq!(period.label(), "01/08 - 01/21");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    /// The start date of the period (inclusive, always a Monday when built by
    /// the segmenter).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl Period {
    /// Creates the period that starts on `start_date` and spans
    /// [`PERIOD_LENGTH_DAYS`] days.
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: start_date + Duration::days(PERIOD_LENGTH_DAYS - 1),
        }
    }

    /// Checks if a given date falls within this period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns every Monday-Friday date inside the period, in order.
    ///
    /// Weekends are excluded regardless of whether anyone works them.
    pub fn expected_work_days(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .filter(|d| is_work_day(*d))
            .collect()
    }

    /// Returns the display label, e.g. `"01/08 - 01/21"`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%m/%d"),
            self.end_date.format("%m/%d")
        )
    }
}

/// Returns true for Monday through Friday.
pub fn is_work_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
