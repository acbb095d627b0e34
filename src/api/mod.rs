//! HTTP API module for the time-clock analysis engine.
//!
//! This module exposes the engine over a single REST endpoint,
//! `POST /analyze`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::AnalysisRequest;
pub use response::{AnalysisResponse, ApiError, ApiErrorResponse, ENGINE_VERSION};
pub use state::AppState;
