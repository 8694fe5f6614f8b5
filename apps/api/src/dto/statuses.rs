use fieldkit_domain::StatusEntry;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query parameters for a status lookup.
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub escape: Option<bool>,
}

/// Display style of a status value.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/status-response.ts"
)]
pub struct StatusResponse {
    pub icon: String,
    pub text: String,
    pub colour: String,
}

impl From<StatusEntry> for StatusResponse {
    fn from(entry: StatusEntry) -> Self {
        Self {
            icon: entry.icon,
            text: entry.text,
            colour: entry.colour.as_str().to_owned(),
        }
    }
}
