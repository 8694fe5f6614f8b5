//! Sanitize-then-validate pipeline for a single field value.

use serde::Serialize;

use crate::validators::ValidationRule;

/// Validity flags of a processed field, shaped after HTML `ValidityState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidity {
    /// A required field has no value.
    pub value_missing: bool,
    /// The value does not match the rule's pattern.
    pub pattern_mismatch: bool,
    /// A semantic validator rejected the value.
    pub custom_error: bool,
    /// The value exceeds the field's maximum length.
    pub too_long: bool,
    /// The value is shorter than the field's minimum length.
    pub too_short: bool,
    /// The value is below the field's minimum.
    pub range_underflow: bool,
    /// The value is above the field's maximum.
    pub range_overflow: bool,
    /// The value has the wrong type.
    pub type_mismatch: bool,
}

impl FieldValidity {
    /// Returns `true` when no flag is raised.
    #[must_use]
    pub fn check_validity(&self) -> bool {
        !(self.value_missing
            || self.pattern_mismatch
            || self.custom_error
            || self.too_long
            || self.too_short
            || self.range_underflow
            || self.range_overflow
            || self.type_mismatch)
    }
}

/// Result of running a raw value through a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOutcome {
    /// Sanitized value the field should display.
    pub value: String,
    /// Validity flags.
    pub validity: FieldValidity,
    /// Message to show; empty when valid or when the rule has no message.
    pub message: String,
}

impl FieldOutcome {
    /// Returns `true` when the value passed every check.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validity.check_validity()
    }
}

const VALUE_MISSING_MESSAGE: &str = "Please fill in this field";

/// Sanitizes a raw value and checks it against a rule.
///
/// Empty values are only an error when `required` is set. Non-empty values
/// are checked by the rule's validator, or by its pattern when it has none.
#[must_use]
pub fn process_field(rule: &ValidationRule, raw: &str, required: bool) -> FieldOutcome {
    let value = rule.sanitise(raw);
    let mut validity = FieldValidity::default();

    if value.is_empty() {
        validity.value_missing = required;
        let message = if required { VALUE_MISSING_MESSAGE } else { "" };

        return FieldOutcome {
            value,
            validity,
            message: message.to_owned(),
        };
    }

    let message = match rule.check(&value) {
        Ok(()) => "",
        Err(message) => {
            if rule.validator().is_some() {
                validity.custom_error = true;
            } else {
                validity.pattern_mismatch = true;
            }
            message
        }
    };

    FieldOutcome {
        value,
        validity,
        message: message.to_owned(),
    }
}
