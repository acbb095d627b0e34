//! Core data models for the time-clock analysis engine.
//!
//! This module contains all the domain models used throughout the engine.

mod anomaly;
mod day_slots;
mod period;
mod period_result;
mod punch;

pub use anomaly::{Anomaly, AnomalyType, Severity};
pub use day_slots::{DaySlots, HoursBand, SeverityBand, Slot, SlotKind, SlotStatus};
pub use period::{PERIOD_LENGTH_DAYS, Period, is_work_day};
pub use period_result::{
    AnalysisReport, AnomalyCount, EmployeeAnalysis, EmployeeScore, OffenderSummary,
    PeriodResult, PeriodSummary,
};
pub use punch::{ClockTime, MINUTES_PER_DAY, PunchRecord, RawPunch};
