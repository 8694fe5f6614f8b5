use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for checking day, month and year parts.
///
/// Each bound may be given as an ISO date or as a millisecond timestamp,
/// but not both.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/check-date-request.ts"
)]
pub struct CheckDateRequest {
    #[ts(type = "number | null")]
    pub day: Option<i64>,
    #[ts(type = "number | null")]
    pub month: Option<i64>,
    #[ts(type = "number | null")]
    pub year: Option<i64>,
    #[serde(default)]
    pub min_date: Option<String>,
    #[serde(default)]
    pub max_date: Option<String>,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub min_timestamp: Option<i64>,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub max_timestamp: Option<i64>,
}

/// Result of a date parts check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/date-check-response.ts"
)]
pub struct DateCheckResponse {
    #[ts(type = "\"incomplete\" | \"invalid\" | \"valid\"")]
    pub status: &'static str,
    pub message: Option<String>,
    #[ts(type = "\"under\" | \"over\" | null")]
    pub direction: Option<&'static str>,
    pub iso_date: Option<String>,
}

/// Query parameters for a relative date.
#[derive(Debug, Deserialize)]
pub struct RelativeDateQuery {
    pub offset: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "year".to_owned()
}

/// A date relative to today.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/relative-date-response.ts"
)]
pub struct RelativeDateResponse {
    pub date: String,
}
