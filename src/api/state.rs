//! Application state for the analysis API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::analysis::AnalysisEngine;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the analysis engine built from the loaded configuration. The engine
/// is immutable, so handlers share it through an [`Arc`] without locking.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<AnalysisEngine>,
}

impl AppState {
    /// Creates a new application state from a configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_engine(AnalysisEngine::new(config.into_config()))
    }

    /// Creates a new application state around an existing engine.
    pub fn with_engine(engine: AnalysisEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the analysis engine.
    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }

    /// Returns a shared handle to the engine for use on a worker thread.
    pub fn engine_handle(&self) -> Arc<AnalysisEngine> {
        Arc::clone(&self.engine)
    }
}
