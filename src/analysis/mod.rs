//! Punch analysis for the time-clock engine.
//!
//! This module contains the analysis pipeline: time normalization, period
//! segmentation, slot assignment and severity classification, anomaly
//! detection, and scoring. [`AnalysisEngine`] wires them together.

mod anomaly_detector;
mod engine;
mod period_segmenter;
mod scorer;
mod severity;
mod slot_assignment;
mod slot_classifier;
mod time_normalizer;

pub use anomaly_detector::{AnomalyDetector, DayPairs, PeriodFindings};
pub use engine::AnalysisEngine;
pub use period_segmenter::{monday_on_or_before, segment_observed, segment_periods};
pub use scorer::{
    anomaly_breakdown, evaluate_offender, rank_offenders, score_anomalies, score_period,
    severity_weight, summarize_periods,
};
pub use severity::{SeverityRule, SeverityTable};
pub use slot_assignment::{
    PositionalSlotAssignment, SlotAssignment, SlotPlacement, ThresholdSlotAssignment,
};
pub use slot_classifier::{MULTIPLE_PUNCHES_NOTE, SlotClassifier, build_day_slots};
pub use time_normalizer::{
    DroppedPunch, NormalizedPunches, normalize_punch, normalize_punches, parse_clock_time,
    parse_punch_date,
};
