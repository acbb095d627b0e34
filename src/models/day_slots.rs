//! Per-day slot classification models.
//!
//! A [`DaySlots`] record is what the visualization collaborator renders: one
//! row per employee per date with the four canonical schedule checkpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the four canonical schedule checkpoints of a work day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Start of the working day.
    MorningArrival,
    /// Clocking out for lunch.
    LunchDeparture,
    /// Clocking back in after lunch.
    LunchReturn,
    /// Clocking out at the end of the day.
    EndOfDay,
}

impl SlotKind {
    /// All slot kinds in schedule order.
    pub const ALL: [SlotKind; 4] = [
        SlotKind::MorningArrival,
        SlotKind::LunchDeparture,
        SlotKind::LunchReturn,
        SlotKind::EndOfDay,
    ];
}

/// Deviation classification of an observed punch against its expected time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    /// Within the tolerance window.
    Acceptable,
    /// Slightly off schedule.
    Minor,
    /// Clearly off schedule.
    Major,
    /// Far off schedule.
    Significant,
}

/// The classification state of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "band")]
pub enum SlotStatus {
    /// The employee did not punch at all that day.
    Absent,
    /// The employee punched that day, but no pair landed in this slot.
    Empty,
    /// A punch landed in this slot and was banded.
    Classified(SeverityBand),
    /// The pair feeding this out-slot was closed on a different date.
    MissedOutPunch,
    /// The day had more than two punch pairs; banding was skipped.
    MultiplePunches,
}

/// A single slot of a day: the raw punch text (if any) and its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// The punch time as printed by the clock, if a punch landed here.
    pub raw: Option<String>,
    /// The slot's classification.
    pub status: SlotStatus,
    /// Free-text flag shown instead of the time (multiple-punch days only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Slot {
    /// A slot on a day the employee did not punch.
    pub fn absent() -> Self {
        Self {
            raw: None,
            status: SlotStatus::Absent,
            note: None,
        }
    }

    /// A slot with nothing in it on a day the employee did punch.
    pub fn empty() -> Self {
        Self {
            raw: None,
            status: SlotStatus::Empty,
            note: None,
        }
    }
}

/// Classification of a day's total worked time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursBand {
    /// No punches that day.
    Absent,
    /// Below the configured lower bound.
    Under,
    /// Within the configured bounds.
    Normal,
    /// Above the configured upper bound.
    Over,
}

/// Slot classification for one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlots {
    /// Employee display name or identifier.
    pub employee: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// Morning arrival slot.
    pub morning_arrival: Slot,
    /// Lunch departure slot.
    pub lunch_departure: Slot,
    /// Lunch return slot.
    pub lunch_return: Slot,
    /// End of day slot.
    pub end_of_day: Slot,
    /// Number of punch pairs recorded that day.
    pub pair_count: usize,
    /// Sum of worked minutes across all pairs of the day.
    pub worked_minutes: u32,
    /// Worked time in hours.
    pub worked_hours: Decimal,
    /// Classification of the worked time.
    pub hours_band: HoursBand,
}

impl DaySlots {
    /// Returns the slot for the given kind.
    pub fn slot(&self, kind: SlotKind) -> &Slot {
        match kind {
            SlotKind::MorningArrival => &self.morning_arrival,
            SlotKind::LunchDeparture => &self.lunch_departure,
            SlotKind::LunchReturn => &self.lunch_return,
            SlotKind::EndOfDay => &self.end_of_day,
        }
    }

    /// Returns a mutable reference to the slot for the given kind.
    pub fn slot_mut(&mut self, kind: SlotKind) -> &mut Slot {
        match kind {
            SlotKind::MorningArrival => &mut self.morning_arrival,
            SlotKind::LunchDeparture => &mut self.lunch_departure,
            SlotKind::LunchReturn => &mut self.lunch_return,
            SlotKind::EndOfDay => &mut self.end_of_day,
        }
    }

    /// Returns true when the employee did not punch on this date.
    pub fn is_absent(&self) -> bool {
        self.pair_count == 0
    }

    /// Returns true when the day was flagged for multiple punches.
    pub fn is_flagged(&self) -> bool {
        self.end_of_day.status == SlotStatus::MultiplePunches
    }

    /// Formats worked time as `H:MM`.
    pub fn worked_time_display(&self) -> String {
        format!("{}:{:02}", self.worked_minutes / 60, self.worked_minutes % 60)
    }
}
