//! Aggregated analysis results.
//!
//! This module contains the [`PeriodResult`] produced per employee per
//! period and the [`AnalysisReport`] that carries the whole run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Anomaly, AnomalyType, DaySlots, Period};

/// The scored anomalies of one employee in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResult {
    /// Employee display name or identifier.
    pub employee: String,
    /// The period analysed.
    pub period: Period,
    /// Anomalies in detection order.
    pub anomalies: Vec<Anomaly>,
    /// Severity-weighted sum of the anomalies.
    pub score: u32,
    /// Number of expected (Mon-Fri) work days in the period.
    pub total_days: usize,
    /// Expected work days the employee punched on.
    pub worked_days: usize,
    /// Expected work days the employee did not punch on.
    pub missed_days: usize,
    /// Saturdays and Sundays the employee punched on.
    pub weekend_days_worked: usize,
}

impl PeriodResult {
    /// An empty result for a period with no punches from the employee.
    pub fn empty(employee: impl Into<String>, period: Period) -> Self {
        Self {
            employee: employee.into(),
            period,
            anomalies: Vec::new(),
            score: 0,
            total_days: 0,
            worked_days: 0,
            missed_days: 0,
            weekend_days_worked: 0,
        }
    }
}

/// Every period result of one employee, ordered by period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAnalysis {
    /// Employee display name or identifier.
    pub employee: String,
    /// One result per period of the run, in period order.
    pub period_results: Vec<PeriodResult>,
}

/// Cross-period statistics of an employee flagged as a systematic offender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffenderSummary {
    /// Employee display name or identifier.
    pub employee: String,
    /// Mean score across every period of the run.
    pub mean_score: Decimal,
    /// Periods scoring at or above the high-score threshold.
    pub high_score_periods: usize,
    /// Number of periods considered.
    pub period_count: usize,
    /// Anomalies across every period.
    pub total_anomalies: usize,
}

/// An employee's score in a period, used in period summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeScore {
    /// Employee display name or identifier.
    pub employee: String,
    /// The period score.
    pub score: u32,
}

/// Statistics for one period across all employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The period summarised.
    pub period: Period,
    /// Mean score across employees.
    pub mean_score: Decimal,
    /// Sum of missed days across employees.
    pub total_missed_days: usize,
    /// Employees at or above the high-score threshold, highest first.
    pub high_risk: Vec<EmployeeScore>,
}

/// How often an anomaly type occurred over the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyCount {
    /// The anomaly type.
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    /// Number of occurrences.
    pub count: usize,
}

/// The complete, immutable output of one analysis run.
///
/// Contains no timestamps or random identifiers: running the engine twice on
/// the same input yields equal reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The periods of the run, in order.
    pub periods: Vec<Period>,
    /// Per-employee results, sorted by employee.
    pub employees: Vec<EmployeeAnalysis>,
    /// Slot classification per employee per date, sorted by employee then date.
    pub day_slots: Vec<DaySlots>,
    /// Ranked systematic offenders, truncated to the configured top count.
    pub offenders: Vec<OffenderSummary>,
    /// One summary per period.
    pub period_summaries: Vec<PeriodSummary>,
    /// Anomaly counts by type, most frequent first.
    pub anomaly_breakdown: Vec<AnomalyCount>,
    /// Records accepted into the run.
    pub accepted_punches: usize,
    /// Raw rows dropped by the time normalizer.
    pub dropped_punches: usize,
}
