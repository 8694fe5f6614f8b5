use fieldkit_domain::{FieldOutcome, FieldValidity, ValidationRule};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a field validation rule.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/field-rule-response.ts"
)]
pub struct FieldRuleResponse {
    pub field_type: String,
    pub pattern: String,
    pub placeholder: String,
    pub error_message: String,
    pub pre_icon: Option<String>,
    pub post_icon: Option<String>,
    pub sanitised: bool,
    pub custom_validator: bool,
}

impl From<&ValidationRule> for FieldRuleResponse {
    fn from(rule: &ValidationRule) -> Self {
        Self {
            field_type: rule.field_type().as_str().to_owned(),
            pattern: rule.pattern().to_owned(),
            placeholder: rule.placeholder().to_owned(),
            error_message: rule.error_message().to_owned(),
            pre_icon: rule.pre_icon().map(str::to_owned),
            post_icon: rule.post_icon().map(str::to_owned),
            sanitised: rule.sanitiser().is_some(),
            custom_validator: rule.validator().is_some(),
        }
    }
}

/// Incoming payload for checking a single field value.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/check-field-request.ts"
)]
pub struct CheckFieldRequest {
    pub value: String,
    #[serde(default)]
    pub required: bool,
}

/// Constraint flags of a checked field.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/field-validity-response.ts"
)]
pub struct FieldValidityResponse {
    pub value_missing: bool,
    pub pattern_mismatch: bool,
    pub custom_error: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub type_mismatch: bool,
}

impl From<FieldValidity> for FieldValidityResponse {
    fn from(validity: FieldValidity) -> Self {
        Self {
            value_missing: validity.value_missing,
            pattern_mismatch: validity.pattern_mismatch,
            custom_error: validity.custom_error,
            too_long: validity.too_long,
            too_short: validity.too_short,
            range_underflow: validity.range_underflow,
            range_overflow: validity.range_overflow,
            type_mismatch: validity.type_mismatch,
        }
    }
}

/// Result of sanitizing and checking a field value.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/field-check-response.ts"
)]
pub struct FieldCheckResponse {
    pub value: String,
    pub valid: bool,
    pub message: String,
    pub validity: FieldValidityResponse,
}

impl From<FieldOutcome> for FieldCheckResponse {
    fn from(outcome: FieldOutcome) -> Self {
        Self {
            valid: outcome.is_valid(),
            value: outcome.value,
            message: outcome.message,
            validity: outcome.validity.into(),
        }
    }
}
