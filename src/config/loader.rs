//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading analysis
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AnalysisConfig, ScheduleConfig, ScoringConfig};

/// Loads and provides access to the analysis configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── schedule.yaml   # Expected schedule, severity bands, hours thresholds
/// └── scoring.yaml    # Severity weights and offender thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use timeclock_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let schedule = &loader.config().schedule().schedule;
/// println!("Expected arrival: {}", schedule.morning_arrival);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AnalysisConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing
    /// - Either file contains invalid YAML or an invalid clock time
    /// - The values are inconsistent (see [`AnalysisConfig::new`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule = Self::load_yaml::<ScheduleConfig>(&path.join("schedule.yaml"))?;
        let scoring = Self::load_yaml::<ScoringConfig>(&path.join("scoring.yaml"))?;

        let config = AnalysisConfig::new(schedule, scoring)?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> AnalysisConfig {
        self.config
    }
}
