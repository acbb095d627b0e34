//! Day slot classification.
//!
//! Builds one [`DaySlots`] per employee per date: the placement of the day's
//! punch pairs into the four schedule slots, a severity band per filled slot,
//! and the day's worked time.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{HoursThresholds, ScheduleConfig};
use crate::models::{
    ClockTime, DaySlots, HoursBand, PunchRecord, Slot, SlotKind, SlotStatus, is_work_day,
};

use super::severity::SeverityTable;
use super::slot_assignment::{SlotAssignment, ThresholdSlotAssignment};

/// Note placed on the end-of-day slot of a day with more than two pairs.
pub const MULTIPLE_PUNCHES_NOTE: &str = "Flagged: Additional Punches Detected";

/// Classifies a day's punch pairs into slots.
#[derive(Debug)]
pub struct SlotClassifier {
    table: SeverityTable,
    assignment: Box<dyn SlotAssignment>,
    hours: HoursThresholds,
}

impl SlotClassifier {
    /// Creates a classifier using threshold placement from the schedule.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::with_assignment(
            config,
            Box::new(ThresholdSlotAssignment::new(
                config.schedule.afternoon_threshold,
            )),
        )
    }

    /// Creates a classifier with an explicit placement strategy.
    pub fn with_assignment(config: &ScheduleConfig, assignment: Box<dyn SlotAssignment>) -> Self {
        Self {
            table: SeverityTable::from_config(config),
            assignment,
            hours: config.hours.clone(),
        }
    }

    /// Returns the severity table in use.
    pub fn table(&self) -> &SeverityTable {
        &self.table
    }

    /// Classifies one employee's pairs on one date.
    ///
    /// `pairs` must be ordered by in-time. An empty slice yields an absent
    /// day.
    pub fn classify_day(&self, employee: &str, date: NaiveDate, pairs: &[PunchRecord]) -> DaySlots {
        if pairs.is_empty() {
            return DaySlots {
                employee: employee.to_string(),
                date,
                morning_arrival: Slot::absent(),
                lunch_departure: Slot::absent(),
                lunch_return: Slot::absent(),
                end_of_day: Slot::absent(),
                pair_count: 0,
                worked_minutes: 0,
                worked_hours: Decimal::ZERO,
                hours_band: HoursBand::Absent,
            };
        }

        let worked_minutes: u32 = pairs.iter().map(PunchRecord::worked_minutes).sum();
        let mut day = DaySlots {
            employee: employee.to_string(),
            date,
            morning_arrival: Slot::empty(),
            lunch_departure: Slot::empty(),
            lunch_return: Slot::empty(),
            end_of_day: Slot::empty(),
            pair_count: pairs.len(),
            worked_minutes,
            worked_hours: (Decimal::from(worked_minutes) / Decimal::from(60)).round_dp(2),
            hours_band: self.hours_band(worked_minutes),
        };

        let flagged = pairs.len() > 2;
        let placement = self.assignment.assign(pairs);
        let halves = [
            (placement.morning, SlotKind::MorningArrival, SlotKind::LunchDeparture),
            (placement.afternoon, SlotKind::LunchReturn, SlotKind::EndOfDay),
        ];

        for (pair, in_slot, out_slot) in halves {
            let Some(pair) = pair else { continue };
            self.fill(&mut day, in_slot, &pair.in_time_raw, pair.in_time, flagged);
            self.fill(&mut day, out_slot, &pair.out_time_raw, pair.out_time, flagged);
            if !flagged && pair.has_date_mismatch() {
                day.slot_mut(out_slot).status = SlotStatus::MissedOutPunch;
            }
        }

        if flagged {
            for kind in SlotKind::ALL {
                day.slot_mut(kind).status = SlotStatus::MultiplePunches;
            }
            day.end_of_day.note = Some(MULTIPLE_PUNCHES_NOTE.to_string());
        }

        day
    }

    fn fill(
        &self,
        day: &mut DaySlots,
        kind: SlotKind,
        raw: &str,
        observed: ClockTime,
        flagged: bool,
    ) {
        let slot = day.slot_mut(kind);
        slot.raw = Some(raw.to_string());
        if !flagged {
            slot.status = SlotStatus::Classified(self.table.classify(kind, observed));
        }
    }

    fn hours_band(&self, worked_minutes: u32) -> HoursBand {
        let hours = Decimal::from(worked_minutes) / Decimal::from(60);
        if hours < self.hours.under_hours {
            HoursBand::Under
        } else if hours > self.hours.over_hours {
            HoursBand::Over
        } else {
            HoursBand::Normal
        }
    }
}

/// Builds the day-slot grid for every employee.
///
/// Every employee gets a row for every date in the global observed-date set
/// (the union of dates anyone punched), restricted to weekdays unless
/// `include_weekends` is set. Rows are sorted by employee, then date.
pub fn build_day_slots(
    classifier: &SlotClassifier,
    records: &[PunchRecord],
    include_weekends: bool,
) -> Vec<DaySlots> {
    let mut by_employee: BTreeMap<&str, BTreeMap<NaiveDate, Vec<PunchRecord>>> = BTreeMap::new();
    let mut all_dates = BTreeSet::new();

    for record in records {
        all_dates.insert(record.date);
        by_employee
            .entry(record.employee.as_str())
            .or_default()
            .entry(record.date)
            .or_default()
            .push(record.clone());
    }

    let grid_dates: Vec<NaiveDate> = all_dates
        .into_iter()
        .filter(|date| include_weekends || is_work_day(*date))
        .collect();

    let mut rows = Vec::with_capacity(by_employee.len() * grid_dates.len());
    for (employee, days) in &mut by_employee {
        for date in &grid_dates {
            let pairs = match days.get_mut(date) {
                Some(pairs) => {
                    pairs.sort_by_key(|p| p.in_time);
                    pairs.as_slice()
                }
                None => &[],
            };
            rows.push(classifier.classify_day(employee, *date, pairs));
        }
    }
    rows
}
