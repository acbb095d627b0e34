//! The analysis engine.
//!
//! [`AnalysisEngine`] runs the whole pipeline over a batch of punches:
//! period segmentation, per-(employee, period) anomaly detection and
//! scoring, the day-slot grid, and the cross-period aggregates.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::models::{AnalysisReport, EmployeeAnalysis, PeriodResult, PunchRecord, RawPunch};

use super::anomaly_detector::{AnomalyDetector, DayPairs};
use super::period_segmenter::segment_observed;
use super::scorer::{anomaly_breakdown, rank_offenders, score_period, summarize_periods};
use super::slot_classifier::{SlotClassifier, build_day_slots};
use super::time_normalizer::normalize_punches;

/// Runs punch analysis with a fixed configuration.
///
/// The engine holds no mutable state; [`AnalysisEngine::analyze`] is a pure
/// function of its input and the configuration.
///
/// # Example
///
/// ```
/// use timeclock_engine::analysis::AnalysisEngine;
/// use timeclock_engine::config::AnalysisConfig;
/// use timeclock_engine::models::RawPunch;
///
/// let engine = AnalysisEngine::new(AnalysisConfig::default());
/// let punch = |in_time: &str, out_time: &str| RawPunch {
///     employee: "Doe, Jane".to_string(),
///     in_date: "01/10/24".to_string(),
///     out_date: "01/10/24".to_string(),
///     in_time: in_time.to_string(),
///     out_time: out_time.to_string(),
/// };
///
/// let report = engine.analyze_raw(vec![punch("08:10a", "12:00p"), punch("12:30p", "04:30p")]);
/// let result = &report.employees[0].period_results[0];
/// assert_eq!(result.worked_days, 1);
/// assert_eq!(result.missed_days, 9);
/// // Nine missed days (high) and one late arrival (medium).
/// assert_eq!(result.score, 95);
/// ```
#[derive(Debug)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    classifier: SlotClassifier,
    detector: AnomalyDetector,
}

impl AnalysisEngine {
    /// Creates an engine for the given configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        let classifier = SlotClassifier::from_config(config.schedule());
        let detector = AnomalyDetector::from_config(config.schedule());
        Self {
            config,
            classifier,
            detector,
        }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Normalizes raw rows and analyzes the ones that parse.
    ///
    /// The report's `dropped_punches` counts the rows that did not.
    pub fn analyze_raw(&self, rows: Vec<RawPunch>) -> AnalysisReport {
        let normalized = normalize_punches(rows);
        let mut report = self.analyze(&normalized.records);
        report.dropped_punches = normalized.dropped.len();
        report
    }

    /// Analyzes a batch of validated punch records.
    ///
    /// Every employee gets one [`PeriodResult`] per period of the run;
    /// periods without their punches yield an empty result.
    pub fn analyze(&self, records: &[PunchRecord]) -> AnalysisReport {
        let started = Instant::now();
        let periods = segment_observed(records.iter().map(|r| r.date));
        let by_employee = group_by_employee(records);

        info!(
            records = records.len(),
            employees = by_employee.len(),
            periods = periods.len(),
            "Starting punch analysis"
        );

        let weights = &self.config.scoring().weights;
        let employees: Vec<EmployeeAnalysis> = by_employee
            .iter()
            .map(|(employee, days)| {
                let period_results: Vec<PeriodResult> = periods
                    .iter()
                    .map(|period| {
                        let findings = self.detector.detect_period(days, period);
                        if findings.total_days == 0 {
                            PeriodResult::empty(*employee, *period)
                        } else {
                            score_period(employee, *period, findings, weights)
                        }
                    })
                    .collect();

                debug!(
                    employee = %employee,
                    days = days.len(),
                    total_score = period_results.iter().map(|r| r.score).sum::<u32>(),
                    "Employee analysed"
                );

                EmployeeAnalysis {
                    employee: employee.to_string(),
                    period_results,
                }
            })
            .collect();

        let schedule = self.config.schedule();
        let rules = &self.config.scoring().offenders;
        let day_slots = build_day_slots(
            &self.classifier,
            records,
            schedule.absence.include_weekends,
        );
        let offenders = rank_offenders(&employees, rules);
        let period_summaries = summarize_periods(&periods, &employees, rules.high_score_threshold);
        let anomaly_breakdown = anomaly_breakdown(&employees);

        info!(
            employees = employees.len(),
            periods = periods.len(),
            offenders = offenders.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Punch analysis complete"
        );

        AnalysisReport {
            periods,
            employees,
            day_slots,
            offenders,
            period_summaries,
            anomaly_breakdown,
            accepted_punches: records.len(),
            dropped_punches: 0,
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Groups records by employee, then by date, each day ordered by in-time.
fn group_by_employee(records: &[PunchRecord]) -> BTreeMap<&str, DayPairs> {
    let mut grouped: BTreeMap<&str, DayPairs> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.employee.as_str())
            .or_default()
            .entry(record.date)
            .or_default()
            .push(record.clone());
    }
    for days in grouped.values_mut() {
        for pairs in days.values_mut() {
            pairs.sort_by_key(|p| p.in_time);
        }
    }
    grouped
}
