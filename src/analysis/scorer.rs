//! Scoring and cross-period aggregation.
//!
//! Folds anomalies into integer period scores, then derives offender
//! rankings, per-period summaries and the anomaly-type breakdown from the
//! finished [`EmployeeAnalysis`] values.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::config::{OffenderRules, SeverityWeights};
use crate::models::{
    Anomaly, AnomalyCount, AnomalyType, EmployeeAnalysis, EmployeeScore, OffenderSummary,
    Period, PeriodResult, PeriodSummary, Severity,
};

use super::anomaly_detector::PeriodFindings;

/// Returns the weight of a severity.
pub fn severity_weight(severity: Severity, weights: &SeverityWeights) -> u32 {
    match severity {
        Severity::High => weights.high,
        Severity::Medium => weights.medium,
        Severity::Low => weights.low,
    }
}

/// Sums the weights of the given anomalies.
///
/// # Example
///
/// ```
/// use timeclock_engine::analysis::score_anomalies;
/// use timeclock_engine::config::SeverityWeights;
///
/// assert_eq!(score_anomalies(&[], &SeverityWeights::default()), 0);
/// ```
pub fn score_anomalies(anomalies: &[Anomaly], weights: &SeverityWeights) -> u32 {
    anomalies
        .iter()
        .map(|a| severity_weight(a.severity, weights))
        .sum()
}

/// Builds the scored result for one employee in one period.
pub fn score_period(
    employee: &str,
    period: Period,
    findings: PeriodFindings,
    weights: &SeverityWeights,
) -> PeriodResult {
    PeriodResult {
        employee: employee.to_string(),
        period,
        score: score_anomalies(&findings.anomalies, weights),
        anomalies: findings.anomalies,
        total_days: findings.total_days,
        worked_days: findings.worked_days,
        missed_days: findings.missed_days,
        weekend_days_worked: findings.weekend_days_worked,
    }
}

fn mean(total: u64, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(total) / Decimal::from(count as u64)
}

/// Evaluates one employee against the offender rules.
///
/// Returns the summary only when the employee is a systematic offender:
/// enough high-score periods, or a high enough mean score.
pub fn evaluate_offender(analysis: &EmployeeAnalysis, rules: &OffenderRules) -> Option<OffenderSummary> {
    let results = &analysis.period_results;
    let high_score_periods = results
        .iter()
        .filter(|r| r.score >= rules.high_score_threshold)
        .count();
    let total: u64 = results.iter().map(|r| u64::from(r.score)).sum();
    let mean_score = mean(total, results.len());

    let flagged = high_score_periods >= rules.min_high_score_periods
        || (!results.is_empty() && mean_score >= rules.mean_score_threshold);
    if !flagged {
        return None;
    }

    Some(OffenderSummary {
        employee: analysis.employee.clone(),
        mean_score: mean_score.round_dp(2),
        high_score_periods,
        period_count: results.len(),
        total_anomalies: results.iter().map(|r| r.anomalies.len()).sum(),
    })
}

/// Ranks systematic offenders by mean score, highest first.
///
/// Ties are broken by employee name; the list is truncated to
/// `rules.top_count`.
pub fn rank_offenders(employees: &[EmployeeAnalysis], rules: &OffenderRules) -> Vec<OffenderSummary> {
    let mut offenders: Vec<OffenderSummary> = employees
        .iter()
        .filter_map(|analysis| evaluate_offender(analysis, rules))
        .collect();

    offenders.sort_by(|a, b| {
        b.mean_score
            .cmp(&a.mean_score)
            .then_with(|| a.employee.cmp(&b.employee))
    });
    offenders.truncate(rules.top_count);
    offenders
}

/// Summarizes each period across all employees.
pub fn summarize_periods(
    periods: &[Period],
    employees: &[EmployeeAnalysis],
    high_score_threshold: u32,
) -> Vec<PeriodSummary> {
    periods
        .iter()
        .map(|period| {
            let results: Vec<&PeriodResult> = employees
                .iter()
                .flat_map(|e| e.period_results.iter())
                .filter(|r| r.period == *period)
                .collect();

            let total: u64 = results.iter().map(|r| u64::from(r.score)).sum();
            let mut high_risk: Vec<EmployeeScore> = results
                .iter()
                .filter(|r| r.score >= high_score_threshold)
                .map(|r| EmployeeScore {
                    employee: r.employee.clone(),
                    score: r.score,
                })
                .collect();
            high_risk.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.employee.cmp(&b.employee)));

            PeriodSummary {
                period: *period,
                mean_score: mean(total, results.len()).round_dp(2),
                total_missed_days: results.iter().map(|r| r.missed_days).sum(),
                high_risk,
            }
        })
        .collect()
}

/// Counts anomalies by type over the whole run, most frequent first.
///
/// Types that never occurred are omitted; ties keep declaration order.
pub fn anomaly_breakdown(employees: &[EmployeeAnalysis]) -> Vec<AnomalyCount> {
    let mut counts: HashMap<AnomalyType, usize> = HashMap::new();
    for anomaly in employees
        .iter()
        .flat_map(|e| e.period_results.iter())
        .flat_map(|r| r.anomalies.iter())
    {
        *counts.entry(anomaly.anomaly_type).or_insert(0) += 1;
    }

    let mut breakdown: Vec<AnomalyCount> = AnomalyType::ALL
        .iter()
        .filter_map(|t| {
            counts.get(t).map(|count| AnomalyCount {
                anomaly_type: *t,
                count: *count,
            })
        })
        .collect();
    // Stable sort keeps declaration order among equal counts.
    breakdown.sort_by(|a, b| b.count.cmp(&a.count));
    breakdown
}
