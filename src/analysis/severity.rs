//! Slot severity classification.
//!
//! All severity thresholds live in one declarative [`SeverityTable`]: for
//! each slot the accepted expected time(s) and an ordered list of
//! `(max_diff, band)` rows. A deviation beyond the last row is
//! [`SeverityBand::Significant`].

use crate::config::ScheduleConfig;
use crate::models::{ClockTime, SeverityBand, SlotKind};

/// The expectation for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityRule {
    /// The slot this row applies to.
    pub slot: SlotKind,
    /// Accepted times; the deviation is measured to the closest one.
    pub expected: Vec<ClockTime>,
    /// Inclusive `(max_diff, band)` rows in ascending order.
    pub bands: Vec<(u16, SeverityBand)>,
}

impl SeverityRule {
    /// Minutes between `observed` and the closest expected time.
    pub fn deviation(&self, observed: ClockTime) -> u16 {
        self.expected
            .iter()
            .map(|expected| observed.distance(*expected))
            .min()
            .unwrap_or(u16::MAX)
    }

    /// Bands a deviation in minutes.
    pub fn band_for(&self, deviation: u16) -> SeverityBand {
        self.bands
            .iter()
            .find(|(max_diff, _)| deviation <= *max_diff)
            .map(|(_, band)| *band)
            .unwrap_or(SeverityBand::Significant)
    }
}

/// Severity rules for the four slots, in [`SlotKind::ALL`] order.
///
/// # Example
///
/// ```
/// use timeclock_engine::analysis::SeverityTable;
/// use timeclock_engine::models::{ClockTime, SeverityBand, SlotKind};
///
/// let table = SeverityTable::default();
/// let observed = ClockTime::from_hm(16, 36).unwrap();
/// assert_eq!(table.classify(SlotKind::EndOfDay, observed), SeverityBand::Minor);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityTable {
    rules: [SeverityRule; 4],
}

impl SeverityTable {
    /// Builds the table from the schedule configuration.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        let bands = vec![
            (config.severity_bands.acceptable, SeverityBand::Acceptable),
            (config.severity_bands.minor, SeverityBand::Minor),
            (config.severity_bands.major, SeverityBand::Major),
        ];
        let schedule = &config.schedule;
        let rule = |slot, expected: Vec<ClockTime>| SeverityRule {
            slot,
            expected,
            bands: bands.clone(),
        };

        Self {
            rules: [
                rule(SlotKind::MorningArrival, vec![schedule.morning_arrival]),
                rule(SlotKind::LunchDeparture, vec![schedule.lunch_departure]),
                rule(SlotKind::LunchReturn, vec![schedule.lunch_return]),
                rule(SlotKind::EndOfDay, schedule.end_of_day.clone()),
            ],
        }
    }

    /// Returns the rule for a slot.
    pub fn rule(&self, slot: SlotKind) -> &SeverityRule {
        &self.rules[slot as usize]
    }

    /// Classifies an observed punch in the given slot.
    pub fn classify(&self, slot: SlotKind, observed: ClockTime) -> SeverityBand {
        let rule = self.rule(slot);
        rule.band_for(rule.deviation(observed))
    }
}

impl Default for SeverityTable {
    fn default() -> Self {
        Self::from_config(&ScheduleConfig::default())
    }
}
