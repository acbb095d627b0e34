//! Punch time and date normalization.
//!
//! This module turns the strings printed by the time clock into typed
//! values. A batch of [`RawPunch`] rows is normalized with
//! [`normalize_punches`]; rows that fail are kept in a drop ledger instead of
//! aborting the batch.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{ClockTime, PunchRecord, RawPunch};

/// Parses a punch-clock time token into a [`ClockTime`].
///
/// Accepted form is `<1-12>:<00-59><a|p>`, case-insensitive, with optional
/// surrounding whitespace. `12a` is midnight and `12p` is noon.
///
/// # Example
///
/// ```
/// use timeclock_engine::analysis::parse_clock_time;
///
/// assert_eq!(parse_clock_time("07:54a").unwrap().minutes(), 474);
/// assert_eq!(parse_clock_time(" 4:30P ").unwrap().minutes(), 990);
/// assert!(parse_clock_time("16:30").is_err());
/// ```
pub fn parse_clock_time(token: &str) -> EngineResult<ClockTime> {
    let invalid = || EngineError::InvalidTimeToken {
        token: token.to_string(),
    };

    let trimmed = token.trim().to_ascii_lowercase();
    let (body, is_pm) = match trimmed.strip_suffix('a') {
        Some(body) => (body, false),
        None => match trimmed.strip_suffix('p') {
            Some(body) => (body, true),
            None => return Err(invalid()),
        },
    };

    let (hour_str, minute_str) = body.split_once(':').ok_or_else(invalid)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hour_str) || hour_str.len() > 2 || !all_digits(minute_str) || minute_str.len() != 2
    {
        return Err(invalid());
    }

    let hour: u16 = hour_str.parse().map_err(|_| invalid())?;
    let minute: u16 = minute_str.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(invalid());
    }

    let hour24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    ClockTime::from_hm(hour24, minute).ok_or_else(invalid)
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock_time(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_clock_time(&value)
    }
}

/// Parses a punch date as printed by the clock (`MM/DD/YY`) or in ISO form.
pub fn parse_punch_date(value: &str) -> EngineResult<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%m/%d/%y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|_| EngineError::InvalidPunchDate {
            value: value.to_string(),
        })
}

/// A raw row excluded during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedPunch {
    /// Zero-based position of the row in the input batch.
    pub row: usize,
    /// Employee named on the row.
    pub employee: String,
    /// Why the row was dropped.
    pub reason: String,
}

/// The outcome of normalizing a batch of raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPunches {
    /// Rows that parsed, in input order.
    pub records: Vec<PunchRecord>,
    /// Rows that did not.
    pub dropped: Vec<DroppedPunch>,
}

/// Normalizes a single raw row.
///
/// The out-date is kept as raw text only; an unparseable out-date surfaces
/// later as a date mismatch rather than dropping the row.
pub fn normalize_punch(raw: RawPunch) -> EngineResult<PunchRecord> {
    let in_time = parse_clock_time(&raw.in_time)?;
    let out_time = parse_clock_time(&raw.out_time)?;
    let date = parse_punch_date(&raw.in_date)?;

    Ok(PunchRecord {
        employee: raw.employee,
        date,
        in_time,
        out_time,
        in_time_raw: raw.in_time,
        out_time_raw: raw.out_time,
        in_date_raw: raw.in_date,
        out_date_raw: raw.out_date,
    })
}

/// Normalizes a batch of raw rows, recording every failure.
///
/// A blank employee name also drops the row. Never fails as a whole.
pub fn normalize_punches(rows: Vec<RawPunch>) -> NormalizedPunches {
    let mut normalized = NormalizedPunches::default();

    for (row, raw) in rows.into_iter().enumerate() {
        let employee = raw.employee.clone();
        let outcome = if raw.employee.trim().is_empty() {
            Err("missing employee name".to_string())
        } else {
            normalize_punch(raw).map_err(|e| e.to_string())
        };

        match outcome {
            Ok(record) => normalized.records.push(record),
            Err(reason) => {
                warn!(row, employee = %employee, reason = %reason, "Dropping punch row");
                normalized.dropped.push(DroppedPunch {
                    row,
                    employee,
                    reason,
                });
            }
        }
    }

    normalized
}
