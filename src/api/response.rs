//! Response types for the analysis API.
//!
//! This module defines the success envelope, the error response structures
//! and the mapping from [`EngineError`] to HTTP errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::AnalysisReport;

/// Version string reported in every response.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Successful response of the `/analyze` endpoint.
///
/// The identifier and timestamp live here only; the wrapped report is a
/// deterministic function of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Identifier of this analysis run (also the request's correlation id).
    pub analysis_id: Uuid,
    /// When the response was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// The analysis report.
    pub report: AnalysisReport,
}

impl AnalysisResponse {
    /// Wraps a report in a response envelope stamped with the current time.
    pub fn new(analysis_id: Uuid, report: AnalysisReport) -> Self {
        Self {
            analysis_id,
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            report,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::InvalidTimeToken { .. } | EngineError::InvalidPunchDate { .. } => {
                ApiErrorResponse {
                    status: StatusCode::BAD_REQUEST,
                    error: ApiError::validation_error(message),
                }
            }
            EngineError::AnalysisError { message: cause } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("ANALYSIS_ERROR", "Analysis failed", cause),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::InvalidConfig {
            field: "severity_bands".to_string(),
            message: "bands must be strictly ascending".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
        assert!(api_error.error.details.unwrap().contains("severity_bands"));
    }

    #[test]
    fn test_input_errors_are_validation_errors() {
        let api_error: ApiErrorResponse = EngineError::InvalidPunchDate {
            value: "Jan 10".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert_eq!(api_error.error.message, "Invalid punch date: 'Jan 10'");
        assert!(api_error.error.details.is_none());
    }

    #[test]
    fn test_analysis_error_mapping() {
        let api_error: ApiErrorResponse = EngineError::AnalysisError {
            message: "worker panicked".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.details.as_deref(), Some("worker panicked"));
    }

    #[test]
    fn test_response_envelope_carries_version() {
        let report = crate::analysis::AnalysisEngine::default().analyze(&[]);
        let response = AnalysisResponse::new(Uuid::new_v4(), report);
        assert_eq!(response.engine_version, ENGINE_VERSION);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["generated_at"].is_string());
        assert!(json["report"]["periods"].as_array().unwrap().is_empty());
    }
}
