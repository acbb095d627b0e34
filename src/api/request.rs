//! Request types for the analysis API.
//!
//! This module defines the JSON request structure for the `/analyze` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::RawPunch;

/// Request body for the `/analyze` endpoint.
///
/// Rows are taken as printed by the time clock; rows that fail to normalize
/// are dropped and counted in the report rather than rejecting the request.
///
/// # Example
///
/// ```
/// use timeclock_engine::api::AnalysisRequest;
///
/// let json = r#"{"punches": [{
///     "employee": "Doe, Jane",
///     "in_date": "01/10/24",
///     "out_date": "01/10/24",
///     "in_time": "07:54a",
///     "out_time": "12:01p"
/// }]}"#;
/// let request: AnalysisRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.punches.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The punch rows to analyse.
    pub punches: Vec<RawPunch>,
}
