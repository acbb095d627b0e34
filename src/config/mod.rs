//! Configuration loading and management for the analysis engine.
//!
//! This module loads the expected schedule, severity bands and scoring
//! thresholds from YAML files. Every value has a built-in default.
//!
//! # Example
//!
//! ```no_run
//! use timeclock_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Buffer: {} min", config.config().schedule().anomaly.buffer_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AbsencePolicy, AnalysisConfig, AnomalyRules, DEFAULT_AFTERNOON_THRESHOLD,
    DEFAULT_ANOMALY_BUFFER_MINUTES, DEFAULT_END_OF_DAY, DEFAULT_LUNCH_DEPARTURE,
    DEFAULT_LUNCH_RETURN, DEFAULT_MORNING_ARRIVAL, ExpectedSchedule, HoursThresholds,
    OffenderRules, ScheduleConfig, ScoringConfig, SeverityBands, SeverityWeights,
};
