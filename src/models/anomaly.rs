//! Anomaly models.
//!
//! An [`Anomaly`] is an immutable fact derived from one day's (or one
//! expected day's) punch data. Anomalies are never merged or deduplicated.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of attendance anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    /// An expected work day with no punches at all.
    MissedDay,
    /// A punch pair whose in-date and out-date differ.
    DateMismatch,
    /// A day with a single punch pair.
    IncompleteDay,
    /// Morning arrival later than the buffer allows.
    LateArrival,
    /// Lunch departure outside the buffer around noon.
    IrregularLunchDeparture,
    /// Lunch return later than the buffer allows.
    LateLunchReturn,
    /// End of day outside the buffer of both accepted end times.
    IrregularEndTime,
    /// More than two punch pairs in a day.
    ExtraPunches,
}

impl AnomalyType {
    /// All anomaly types, in declaration order.
    pub const ALL: [AnomalyType; 8] = [
        AnomalyType::MissedDay,
        AnomalyType::DateMismatch,
        AnomalyType::IncompleteDay,
        AnomalyType::LateArrival,
        AnomalyType::IrregularLunchDeparture,
        AnomalyType::LateLunchReturn,
        AnomalyType::IrregularEndTime,
        AnomalyType::ExtraPunches,
    ];
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnomalyType::MissedDay => "Missed Day",
            AnomalyType::DateMismatch => "Date Mismatch",
            AnomalyType::IncompleteDay => "Incomplete Day",
            AnomalyType::LateArrival => "Late Arrival",
            AnomalyType::IrregularLunchDeparture => "Irregular Lunch Departure",
            AnomalyType::LateLunchReturn => "Late Lunch Return",
            AnomalyType::IrregularEndTime => "Irregular End Time",
            AnomalyType::ExtraPunches => "Extra Punches",
        };
        f.write_str(label)
    }
}

/// Severity of an anomaly; drives the period score weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Weighted 10 by default.
    High,
    /// Weighted 5 by default.
    Medium,
    /// Weighted 2 by default.
    Low,
}

/// A single detected anomaly.
///
/// # Example
///
/// ```
/// use timeclock_engine::models::{Anomaly, AnomalyType, Severity};
/// use chrono::NaiveDate;
///
/// let anomaly = Anomaly {
///     anomaly_type: AnomalyType::LateArrival,
///     date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     severity: Severity::Medium,
///     description: "Late arrival: 08:10a (10 min late)".to_string(),
///     minutes_late: Some(10),
///     extra_pairs: None,
/// };
/// let json = serde_json::to_string(&anomaly).unwrap();
/// assert!(json.contains("\"type\":\"late_arrival\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// What kind of anomaly this is.
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    /// The date the anomaly belongs to.
    pub date: NaiveDate,
    /// Severity used for scoring.
    pub severity: Severity,
    /// Human-readable description.
    pub description: String,
    /// Minutes past the expected time (late arrival / late lunch return).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_late: Option<u32>,
    /// Number of punch pairs beyond two (extra punches only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_pairs: Option<usize>,
}
