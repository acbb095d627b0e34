//! Punch models and related types.
//!
//! This module defines [`ClockTime`], the raw row handed over by ingestion
//! ([`RawPunch`]) and the validated [`PunchRecord`] the engine works on.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minutes in one day; out-times below in-times roll over by this amount.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A local wall-clock time expressed as minutes since midnight (0-1439).
///
/// Parsing from punch tokens such as `"07:54a"` lives in
/// [`crate::analysis::parse_clock_time`]; `ClockTime` also implements
/// `FromStr` and deserializes from the same token syntax.
///
/// # Example
///
/// ```
/// use timeclock_engine::models::ClockTime;
///
/// let time = ClockTime::from_hm(7, 54).unwrap();
/// assert_eq!(time.minutes(), 474);
/// assert_eq!(time.to_string(), "7:54 AM");
/// assert_eq!(time.to_token(), "07:54a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Creates a clock time from a 24-hour hour and minute in const context.
    ///
    /// Intended for schedule constants. Use [`ClockTime::from_hm`] for
    /// values known only at runtime.
    ///
    /// # Panics
    ///
    /// Panics if `hour > 23` or `minute > 59`. In a `const` item this is a
    /// compile error instead.
    pub const fn at(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "clock time out of range");
        Self(hour * 60 + minute)
    }

    /// Creates a clock time from minutes since midnight.
    ///
    /// Returns `None` when `minutes` is outside `0..1440`.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Creates a clock time from a 24-hour hour and minute.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Self::from_minutes(hour * 60 + minute)
    }

    /// Returns the number of minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Returns the absolute distance in minutes to another clock time.
    ///
    /// The distance is taken on the same day; it does not wrap at midnight.
    pub fn distance(self, other: ClockTime) -> u16 {
        self.0.abs_diff(other.0)
    }

    /// Formats the time in punch-clock token form (e.g. `"04:30p"`).
    pub fn to_token(self) -> String {
        let hour = self.0 / 60;
        let minute = self.0 % 60;
        let suffix = if hour < 12 { 'a' } else { 'p' };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{:02}:{:02}{}", hour12, minute, suffix)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.0 / 60;
        let minute = self.0 % 60;
        let am_pm = if hour < 12 { "AM" } else { "PM" };
        let hour12 = match hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        write!(f, "{}:{:02} {}", hour12, minute, am_pm)
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_token()
    }
}

/// A punch row exactly as the ingestion collaborator hands it over.
///
/// No field has been validated yet; see
/// [`crate::analysis::normalize_punches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPunch {
    /// Employee display name or identifier.
    pub employee: String,
    /// The punch-in date as printed by the clock (e.g. `"01/10/24"`).
    pub in_date: String,
    /// The punch-out date as printed by the clock.
    pub out_date: String,
    /// The punch-in time token (e.g. `"07:54a"`).
    pub in_time: String,
    /// The punch-out time token.
    pub out_time: String,
}

/// A validated in/out punch pair for one employee on one work date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// Employee display name or identifier.
    pub employee: String,
    /// The work date (taken from the punch-in date).
    pub date: NaiveDate,
    /// Punch-in time.
    pub in_time: ClockTime,
    /// Punch-out time.
    pub out_time: ClockTime,
    /// Punch-in time as printed by the clock.
    pub in_time_raw: String,
    /// Punch-out time as printed by the clock.
    pub out_time_raw: String,
    /// Punch-in date as printed by the clock.
    pub in_date_raw: String,
    /// Punch-out date as printed by the clock.
    pub out_date_raw: String,
}

impl PunchRecord {
    /// Returns true when the in-date and out-date strings differ.
    ///
    /// The clock closes a forgotten out-punch on a later date, so a mismatch
    /// is the signature of a missed out punch.
    ///
    /// # Example
    ///
    /// ```
    /// use timeclock_engine::models::{ClockTime, PunchRecord};
    /// use chrono::NaiveDate;
    ///
    /// let record = PunchRecord {
    ///     employee: "Doe, Jane".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
    ///     in_time: ClockTime::from_hm(8, 0).unwrap(),
    ///     out_time: ClockTime::from_hm(12, 0).unwrap(),
    ///     in_time_raw: "08:00a".to_string(),
    ///     out_time_raw: "12:00p".to_string(),
    ///     in_date_raw: "01/10/24".to_string(),
    ///     out_date_raw: "01/11/24".to_string(),
    /// };
    /// assert!(record.has_date_mismatch());
    /// ```
    pub fn has_date_mismatch(&self) -> bool {
        self.in_date_raw != self.out_date_raw
    }

    /// Returns the minutes between in and out, rolling over midnight.
    pub fn worked_minutes(&self) -> u32 {
        let start = u32::from(self.in_time.minutes());
        let end = u32::from(self.out_time.minutes());
        if end < start {
            end + u32::from(MINUTES_PER_DAY) - start
        } else {
            end - start
        }
    }
}
