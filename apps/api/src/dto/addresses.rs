use fieldkit_domain::{AddressOption, AddressRecord};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query parameters for address autocomplete.
#[derive(Debug, Deserialize)]
pub struct AddressSearchQuery {
    #[serde(default)]
    pub q: String,
}

/// API representation of an address autocomplete option.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/address-option-response.ts"
)]
pub struct AddressOptionResponse {
    pub id: Option<String>,
    pub label: String,
    pub value: String,
    pub score: f64,
    pub normalised: String,
    pub manual_entry: bool,
}

impl From<AddressOption> for AddressOptionResponse {
    fn from(option: AddressOption) -> Self {
        Self {
            id: option.id,
            label: option.label,
            value: option.value,
            score: option.score,
            normalised: option.normalised,
            manual_entry: option.manual_entry,
        }
    }
}

/// Incoming payload for rendering an address record as text.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/format-address-request.ts"
)]
pub struct FormatAddressRequest {
    #[ts(type = "Record<string, string | null>")]
    pub address: AddressRecord,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    ", ".to_owned()
}

/// Human readable address and its validity.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/format-address-response.ts"
)]
pub struct FormatAddressResponse {
    pub text: String,
    pub valid: bool,
}
