//! Configuration types for punch analysis.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has a
//! `Default` that reproduces the standard 8:00-4:30 schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ClockTime, MINUTES_PER_DAY};

/// Expected morning arrival.
pub const DEFAULT_MORNING_ARRIVAL: ClockTime = ClockTime::at(8, 0);
/// Expected lunch departure.
pub const DEFAULT_LUNCH_DEPARTURE: ClockTime = ClockTime::at(12, 0);
/// Expected lunch return.
pub const DEFAULT_LUNCH_RETURN: ClockTime = ClockTime::at(12, 30);
/// Accepted end-of-day times.
pub const DEFAULT_END_OF_DAY: [ClockTime; 2] = [ClockTime::at(16, 0), ClockTime::at(16, 30)];
/// A first punch at or after this time is placed in the afternoon slots.
pub const DEFAULT_AFTERNOON_THRESHOLD: ClockTime = ClockTime::at(11, 0);
/// Tolerance used by the anomaly detector. Not shared with the slot bands.
pub const DEFAULT_ANOMALY_BUFFER_MINUTES: u16 = 7;

/// The expected daily schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedSchedule {
    /// Expected morning arrival.
    pub morning_arrival: ClockTime,
    /// Expected lunch departure.
    pub lunch_departure: ClockTime,
    /// Expected lunch return.
    pub lunch_return: ClockTime,
    /// Accepted end-of-day times; the closest one is used.
    pub end_of_day: Vec<ClockTime>,
    /// First punches before this time go to the morning slots.
    pub afternoon_threshold: ClockTime,
}

impl Default for ExpectedSchedule {
    fn default() -> Self {
        Self {
            morning_arrival: DEFAULT_MORNING_ARRIVAL,
            lunch_departure: DEFAULT_LUNCH_DEPARTURE,
            lunch_return: DEFAULT_LUNCH_RETURN,
            end_of_day: DEFAULT_END_OF_DAY.to_vec(),
            afternoon_threshold: DEFAULT_AFTERNOON_THRESHOLD,
        }
    }
}

/// Inclusive upper bounds (in minutes) of the slot severity bands.
///
/// Anything above `major` is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBands {
    /// Upper bound of the acceptable band.
    pub acceptable: u16,
    /// Upper bound of the minor band.
    pub minor: u16,
    /// Upper bound of the major band.
    pub major: u16,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            acceptable: 5,
            minor: 7,
            major: 11,
        }
    }
}

/// Anomaly detector settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyRules {
    /// Minutes of tolerance before a punch is reported.
    pub buffer_minutes: u16,
}

impl Default for AnomalyRules {
    fn default() -> Self {
        Self {
            buffer_minutes: DEFAULT_ANOMALY_BUFFER_MINUTES,
        }
    }
}

/// Bounds of a normal working day, in hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursThresholds {
    /// Days worked below this are `under`.
    pub under_hours: Decimal,
    /// Days worked above this are `over`.
    pub over_hours: Decimal,
}

impl Default for HoursThresholds {
    fn default() -> Self {
        Self {
            under_hours: Decimal::new(75, 1),
            over_hours: Decimal::new(85, 1),
        }
    }
}

/// Which dates make up the day-slot grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsencePolicy {
    /// Include observed Saturdays and Sundays in the grid.
    #[serde(default)]
    pub include_weekends: bool,
}

/// Contents of `schedule.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// The expected schedule.
    pub schedule: ExpectedSchedule,
    /// Slot severity bands.
    pub severity_bands: SeverityBands,
    /// Anomaly detector settings.
    pub anomaly: AnomalyRules,
    /// Daily hours thresholds.
    pub hours: HoursThresholds,
    /// Absence grid policy.
    #[serde(default)]
    pub absence: AbsencePolicy,
}

/// Score weight per anomaly severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityWeights {
    /// Weight of a high-severity anomaly.
    pub high: u32,
    /// Weight of a medium-severity anomaly.
    pub medium: u32,
    /// Weight of a low-severity anomaly.
    pub low: u32,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            high: 10,
            medium: 5,
            low: 2,
        }
    }
}

/// Systematic offender thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffenderRules {
    /// A period scoring at least this much is a high-score period.
    pub high_score_threshold: u32,
    /// This many high-score periods flag an employee.
    pub min_high_score_periods: usize,
    /// A mean score of at least this much flags an employee.
    pub mean_score_threshold: Decimal,
    /// How many ranked offenders are surfaced.
    pub top_count: usize,
}

impl Default for OffenderRules {
    fn default() -> Self {
        Self {
            high_score_threshold: 20,
            min_high_score_periods: 2,
            mean_score_threshold: Decimal::from(15),
            top_count: 5,
        }
    }
}

/// Contents of `scoring.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Severity weights.
    pub weights: SeverityWeights,
    /// Offender thresholds.
    pub offenders: OffenderRules,
}

/// The complete analysis configuration.
///
/// Built through [`AnalysisConfig::new`], which rejects inconsistent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    schedule: ScheduleConfig,
    scoring: ScoringConfig,
}

impl AnalysisConfig {
    /// Creates a validated configuration from its component parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the severity bands are not
    /// strictly ascending, the anomaly buffer spans a whole day, no end-of-day
    /// time is given, the hours thresholds are inverted, or no offenders would
    /// ever be surfaced.
    pub fn new(schedule: ScheduleConfig, scoring: ScoringConfig) -> EngineResult<Self> {
        let bands = &schedule.severity_bands;
        if !(bands.acceptable < bands.minor && bands.minor < bands.major) {
            return Err(EngineError::InvalidConfig {
                field: "severity_bands".to_string(),
                message: format!(
                    "bands must be strictly ascending, got {}/{}/{}",
                    bands.acceptable, bands.minor, bands.major
                ),
            });
        }

        if schedule.anomaly.buffer_minutes >= MINUTES_PER_DAY {
            return Err(EngineError::InvalidConfig {
                field: "anomaly.buffer_minutes".to_string(),
                message: format!(
                    "must be less than {}, got {}",
                    MINUTES_PER_DAY, schedule.anomaly.buffer_minutes
                ),
            });
        }

        if schedule.schedule.end_of_day.is_empty() {
            return Err(EngineError::InvalidConfig {
                field: "schedule.end_of_day".to_string(),
                message: "at least one end-of-day time is required".to_string(),
            });
        }

        if schedule.hours.under_hours > schedule.hours.over_hours {
            return Err(EngineError::InvalidConfig {
                field: "hours".to_string(),
                message: "under_hours must not exceed over_hours".to_string(),
            });
        }

        if scoring.offenders.top_count == 0 {
            return Err(EngineError::InvalidConfig {
                field: "offenders.top_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self { schedule, scoring })
    }

    /// Returns the schedule configuration.
    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    /// Returns the scoring configuration.
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_standard_schedule() {
        let config = AnalysisConfig::default();
        let schedule = &config.schedule().schedule;
        assert_eq!(schedule.morning_arrival.minutes(), 480);
        assert_eq!(schedule.lunch_departure.minutes(), 720);
        assert_eq!(schedule.lunch_return.minutes(), 750);
        assert_eq!(
            schedule.end_of_day.iter().map(|t| t.minutes()).collect::<Vec<_>>(),
            vec![960, 990]
        );
        assert_eq!(schedule.afternoon_threshold.minutes(), 660);
        assert_eq!(config.schedule().anomaly.buffer_minutes, 7);
        assert_eq!(config.scoring().weights.high, 10);
        assert_eq!(config.scoring().offenders.top_count, 5);
    }

    #[test]
    fn test_default_passes_validation() {
        let result = AnalysisConfig::new(ScheduleConfig::default(), ScoringConfig::default());
        assert_eq!(result.unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_non_ascending_bands_rejected() {
        let mut schedule = ScheduleConfig::default();
        schedule.severity_bands.minor = 5;

        match AnalysisConfig::new(schedule, ScoringConfig::default()) {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "severity_bands"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_day_long_buffer_rejected() {
        let mut schedule = ScheduleConfig::default();
        schedule.anomaly.buffer_minutes = 65000;

        match AnalysisConfig::new(schedule, ScoringConfig::default()) {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "anomaly.buffer_minutes")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_end_of_day_rejected() {
        let mut schedule = ScheduleConfig::default();
        schedule.schedule.end_of_day.clear();
        assert!(AnalysisConfig::new(schedule, ScoringConfig::default()).is_err());
    }

    #[test]
    fn test_zero_top_count_rejected() {
        let mut scoring = ScoringConfig::default();
        scoring.offenders.top_count = 0;
        assert!(AnalysisConfig::new(ScheduleConfig::default(), scoring).is_err());
    }

    #[test]
    fn test_schedule_yaml_deserialization() {
        let yaml = r#"
schedule:
  morning_arrival: "7:30a"
  lunch_departure: "11:30a"
  lunch_return: "12:00p"
  end_of_day: ["03:30p"]
  afternoon_threshold: "10:30a"
severity_bands:
  acceptable: 3
  minor: 6
  major: 10
anomaly:
  buffer_minutes: 5
hours:
  under_hours: "7.0"
  over_hours: "9.0"
"#;
        let config: ScheduleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.schedule.morning_arrival.minutes(), 450);
        assert_eq!(config.schedule.end_of_day.len(), 1);
        assert_eq!(config.severity_bands.major, 10);
        assert!(!config.absence.include_weekends);
    }
}
