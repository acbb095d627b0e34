//! Error types for the time-clock analysis engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. Note that a malformed punch is
//! never fatal to an analysis run: the normalizer turns the error into a
//! drop-ledger entry and moves on.

use thiserror::Error;

/// The main error type for the time-clock analysis engine.
///
/// # Example
///
/// ```
/// use timeclock_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeToken {
///     token: "7:54".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid punch time token: '7:54'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds inconsistent values.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A punch-clock time token did not match `<1-12>:<00-59><a|p>`.
    #[error("Invalid punch time token: '{token}'")]
    InvalidTimeToken {
        /// The raw token as received.
        token: String,
    },

    /// A punch date could not be parsed.
    #[error("Invalid punch date: '{value}'")]
    InvalidPunchDate {
        /// The raw date string as received.
        value: String,
    },

    /// The analysis batch could not be completed.
    #[error("Analysis error: {message}")]
    AnalysisError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
