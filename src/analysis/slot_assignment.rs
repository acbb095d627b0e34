//! Slot assignment strategies.
//!
//! A day's punch pairs are split between the morning slots (arrival, lunch
//! departure) and the afternoon slots (lunch return, end of day). Two
//! strategies exist and they intentionally disagree for days whose first
//! pair starts late:
//!
//! - [`ThresholdSlotAssignment`] feeds the slot grid. A first pair starting
//!   at or after the threshold is an afternoon pair.
//! - [`PositionalSlotAssignment`] feeds the anomaly detector. The first pair
//!   is always the morning pair.

use std::fmt;

use crate::models::{ClockTime, PunchRecord};

/// Which pair (if any) feeds each half of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotPlacement<'a> {
    /// Pair feeding arrival and lunch departure.
    pub morning: Option<&'a PunchRecord>,
    /// Pair feeding lunch return and end of day.
    pub afternoon: Option<&'a PunchRecord>,
}

/// Decides which of a day's pairs feed the morning and afternoon slots.
///
/// `pairs` must belong to one employee and date, ordered by in-time.
pub trait SlotAssignment: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Places the day's pairs.
    fn assign<'a>(&self, pairs: &'a [PunchRecord]) -> SlotPlacement<'a>;
}

/// Places the first pair by comparing its in-time to a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdSlotAssignment {
    /// First pairs starting before this go to the morning slots.
    pub threshold: ClockTime,
}

impl ThresholdSlotAssignment {
    /// Creates the strategy with the given threshold.
    pub fn new(threshold: ClockTime) -> Self {
        Self { threshold }
    }
}

impl SlotAssignment for ThresholdSlotAssignment {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn assign<'a>(&self, pairs: &'a [PunchRecord]) -> SlotPlacement<'a> {
        match pairs.first() {
            None => SlotPlacement::default(),
            Some(first) if first.in_time < self.threshold => SlotPlacement {
                morning: Some(first),
                afternoon: pairs.get(1),
            },
            // A late first pair owns the afternoon; any second pair is unplaced.
            Some(first) => SlotPlacement {
                morning: None,
                afternoon: Some(first),
            },
        }
    }
}

/// Places pairs by position: first is morning, second is afternoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionalSlotAssignment;

impl SlotAssignment for PositionalSlotAssignment {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn assign<'a>(&self, pairs: &'a [PunchRecord]) -> SlotPlacement<'a> {
        SlotPlacement {
            morning: pairs.first(),
            afternoon: pairs.get(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_AFTERNOON_THRESHOLD;
    use chrono::NaiveDate;

    fn make_punch(in_hm: (u16, u16), out_hm: (u16, u16)) -> PunchRecord {
        let in_time = ClockTime::from_hm(in_hm.0, in_hm.1).unwrap();
        let out_time = ClockTime::from_hm(out_hm.0, out_hm.1).unwrap();
        PunchRecord {
            employee: "Doe, Jane".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            in_time,
            out_time,
            in_time_raw: in_time.to_token(),
            out_time_raw: out_time.to_token(),
            in_date_raw: "01/10/24".to_string(),
            out_date_raw: "01/10/24".to_string(),
        }
    }

    fn threshold() -> ThresholdSlotAssignment {
        ThresholdSlotAssignment::new(DEFAULT_AFTERNOON_THRESHOLD)
    }

    #[test]
    fn test_no_pairs_places_nothing() {
        assert_eq!(threshold().assign(&[]), SlotPlacement::default());
        assert_eq!(PositionalSlotAssignment.assign(&[]), SlotPlacement::default());
    }

    #[test]
    fn test_regular_day_agrees() {
        let pairs = vec![make_punch((8, 0), (12, 0)), make_punch((12, 30), (16, 30))];
        assert_eq!(threshold().assign(&pairs), PositionalSlotAssignment.assign(&pairs));
        assert_eq!(threshold().assign(&pairs).afternoon, Some(&pairs[1]));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let pairs = vec![make_punch((10, 59), (16, 0))];
        assert!(threshold().assign(&pairs).morning.is_some());

        let pairs = vec![make_punch((11, 0), (16, 0))];
        let placement = threshold().assign(&pairs);
        assert!(placement.morning.is_none());
        assert_eq!(placement.afternoon, Some(&pairs[0]));
    }

    /// SA-001: strategies disagree for a first pair starting at 1:00 PM
    #[test]
    fn test_strategies_disagree_for_late_starter() {
        let pairs = vec![make_punch((13, 0), (15, 0)), make_punch((15, 30), (17, 0))];

        let by_threshold = threshold().assign(&pairs);
        assert!(by_threshold.morning.is_none());
        assert_eq!(by_threshold.afternoon, Some(&pairs[0]));

        let by_position = PositionalSlotAssignment.assign(&pairs);
        assert_eq!(by_position.morning, Some(&pairs[0]));
        assert_eq!(by_position.afternoon, Some(&pairs[1]));
    }
}
