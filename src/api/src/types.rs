//! Response types for the Climate API.

use serde::Serialize;
use serde_json::Number;
use std::collections::BTreeMap;

/// Date string to temperature observation, keys sorted
pub type PrecipitationResponse = BTreeMap<String, Option<Number>>;

/// Station names in store order
pub type StationsResponse = Vec<Option<String>>;

/// Temperature observations in query result order
pub type TobsResponse = Vec<Option<Number>>;

/// Temperature aggregates over a date range; every field is `null` when no row matched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureSummary {
    pub min: Option<Number>,
    pub avg: Option<Number>,
    pub max: Option<Number>,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
