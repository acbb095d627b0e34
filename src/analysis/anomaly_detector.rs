//! Anomaly detection.
//!
//! Emits typed [`Anomaly`] records for one employee in one period. Days with
//! exactly two pairs are checked against the expected schedule using
//! [`PositionalSlotAssignment`]; lateness checks fire on lateness only.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::{ExpectedSchedule, ScheduleConfig};
use crate::models::{
    Anomaly, AnomalyType, ClockTime, Period, PunchRecord, Severity, is_work_day,
};

use super::slot_assignment::{PositionalSlotAssignment, SlotAssignment};

/// One employee's pairs keyed by date, each day ordered by in-time.
pub type DayPairs = BTreeMap<NaiveDate, Vec<PunchRecord>>;

/// Anomalies and day accounting for one employee in one period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodFindings {
    /// Anomalies in detection order.
    pub anomalies: Vec<Anomaly>,
    /// Expected (Mon-Fri) days in the period.
    pub total_days: usize,
    /// Expected days with at least one pair.
    pub worked_days: usize,
    /// Expected days with no pairs.
    pub missed_days: usize,
    /// Weekend days with at least one pair.
    pub weekend_days_worked: usize,
}

/// Detects attendance anomalies against the expected schedule.
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    schedule: ExpectedSchedule,
    buffer_minutes: u16,
    assignment: PositionalSlotAssignment,
}

impl AnomalyDetector {
    /// Creates a detector from the schedule configuration.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self {
            schedule: config.schedule.clone(),
            buffer_minutes: config.anomaly.buffer_minutes,
            assignment: PositionalSlotAssignment,
        }
    }

    /// Detects anomalies for one employee in one period.
    ///
    /// Missed days come first in date order, then each worked day's
    /// date mismatches followed by its pattern anomaly. An employee with no
    /// pairs in the period gets empty findings.
    pub fn detect_period(&self, days: &DayPairs, period: &Period) -> PeriodFindings {
        let worked: Vec<(&NaiveDate, &Vec<PunchRecord>)> = days
            .range(period.start_date..=period.end_date)
            .filter(|(_, pairs)| !pairs.is_empty())
            .collect();
        if worked.is_empty() {
            return PeriodFindings::default();
        }

        let expected_days = period.expected_work_days();
        let mut anomalies = Vec::new();
        let mut worked_days = 0;

        for date in &expected_days {
            if days.get(date).is_some_and(|pairs| !pairs.is_empty()) {
                worked_days += 1;
            } else {
                anomalies.push(Anomaly {
                    anomaly_type: AnomalyType::MissedDay,
                    date: *date,
                    severity: Severity::High,
                    description: format!("Missed entire work day on {}", date.format("%m/%d/%y")),
                    minutes_late: None,
                    extra_pairs: None,
                });
            }
        }

        let weekend_days_worked = worked.iter().filter(|(date, _)| !is_work_day(**date)).count();

        for (date, pairs) in worked {
            anomalies.extend(self.detect_day(*date, pairs));
        }

        PeriodFindings {
            anomalies,
            total_days: expected_days.len(),
            worked_days,
            missed_days: expected_days.len() - worked_days,
            weekend_days_worked,
        }
    }

    /// Detects the anomalies of a single worked day.
    ///
    /// `pairs` must be ordered by in-time.
    pub fn detect_day(&self, date: NaiveDate, pairs: &[PunchRecord]) -> Vec<Anomaly> {
        let mut anomalies: Vec<Anomaly> = pairs
            .iter()
            .filter(|pair| pair.has_date_mismatch())
            .map(|pair| Anomaly {
                anomaly_type: AnomalyType::DateMismatch,
                date,
                severity: Severity::Medium,
                description: format!(
                    "Punch dates don't match: {} vs {}",
                    pair.in_date_raw, pair.out_date_raw
                ),
                minutes_late: None,
                extra_pairs: None,
            })
            .collect();

        match pairs.len() {
            0 => {}
            1 => anomalies.push(Anomaly {
                anomaly_type: AnomalyType::IncompleteDay,
                date,
                severity: Severity::Medium,
                description: format!("Only one punch pair on {}", date.format("%m/%d/%y")),
                minutes_late: None,
                extra_pairs: None,
            }),
            2 => anomalies.extend(self.check_schedule(date, pairs)),
            count => {
                let extra = count - 2;
                anomalies.push(Anomaly {
                    anomaly_type: AnomalyType::ExtraPunches,
                    date,
                    severity: Severity::Low,
                    description: format!(
                        "Extra punch pairs ({}) indicating additional breaks",
                        extra
                    ),
                    minutes_late: None,
                    extra_pairs: Some(extra),
                });
            }
        }

        anomalies
    }

    fn check_schedule(&self, date: NaiveDate, pairs: &[PunchRecord]) -> Vec<Anomaly> {
        let placement = self.assignment.assign(pairs);
        let (Some(morning), Some(afternoon)) = (placement.morning, placement.afternoon) else {
            return Vec::new();
        };

        let buffer = self.buffer_minutes;
        let schedule = &self.schedule;
        let mut anomalies = Vec::new();

        let arrival_late = minutes_late(morning.in_time, schedule.morning_arrival, buffer);
        if let Some(late) = arrival_late {
            anomalies.push(Anomaly {
                anomaly_type: AnomalyType::LateArrival,
                date,
                severity: Severity::Medium,
                description: format!("Late arrival: {} ({} min late)", morning.in_time_raw, late),
                minutes_late: Some(late),
                extra_pairs: None,
            });
        }

        if morning.out_time.distance(schedule.lunch_departure) > buffer {
            anomalies.push(Anomaly {
                anomaly_type: AnomalyType::IrregularLunchDeparture,
                date,
                severity: Severity::Low,
                description: format!("Irregular lunch departure: {}", morning.out_time_raw),
                minutes_late: None,
                extra_pairs: None,
            });
        }

        let return_late = minutes_late(afternoon.in_time, schedule.lunch_return, buffer);
        if let Some(late) = return_late {
            anomalies.push(Anomaly {
                anomaly_type: AnomalyType::LateLunchReturn,
                date,
                severity: Severity::Medium,
                description: format!(
                    "Late lunch return: {} ({} min late)",
                    afternoon.in_time_raw, late
                ),
                minutes_late: Some(late),
                extra_pairs: None,
            });
        }

        let end_ok = schedule
            .end_of_day
            .iter()
            .any(|expected| afternoon.out_time.distance(*expected) <= buffer);
        if !end_ok {
            anomalies.push(Anomaly {
                anomaly_type: AnomalyType::IrregularEndTime,
                date,
                severity: Severity::Low,
                description: format!("Irregular end time: {}", afternoon.out_time_raw),
                minutes_late: None,
                extra_pairs: None,
            });
        }

        anomalies
    }
}

/// Minutes past `expected`, when beyond the buffer. Early punches yield `None`.
fn minutes_late(observed: ClockTime, expected: ClockTime, buffer: u16) -> Option<u32> {
    let (observed, expected) = (observed.minutes(), expected.minutes());
    (observed > expected.saturating_add(buffer)).then(|| u32::from(observed - expected))
}
