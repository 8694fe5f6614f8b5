//! Field validation, sanitization, date, address and status logic.

#![forbid(unsafe_code)]

mod address;
mod dates;
mod field;
mod markup;
mod sanitisers;
mod status;
mod validators;

use regex::Regex;

pub use address::{
    AddressKind, AddressOption, AddressRecord, AddressStrParts, MANUAL_ADDRESS_LABEL,
    MANUAL_ADDRESS_VALUE, SevenPartAddress, address_is_same, address_is_valid, address_to_human,
    change_addr_prefix, expand_street_abbreviations, normalise_addr, prefix_addr,
    split_address_str, strip_addr_type_prefix,
};
pub use dates::{
    DateCheck, DateDirection, DateError, DateLimit, DateParts, date_from_parts, days_in_month,
    get_date_error, get_relative_iso_date, human_date, is_iso8601_str, iso_from_parts,
    local_iso_date, month_name, months, parse_date,
};
pub use field::{FieldOutcome, FieldValidity, process_field};
pub use markup::{ErrorMsgParts, br_br_to_p, split_error_msg, str_array_to_human_str, strip_p_in_li};
pub use sanitisers::{
    AUST_PHONE_MAX_LENGTH, INT_PHONE_MAX_LENGTH, MONEY_MAX_LENGTH, PERCENT_MAX_LENGTH,
    POST_CODE_MAX_LENGTH, Sanitiser, sanitise_addr_line, sanitise_aust_phone, sanitise_int_phone,
    sanitise_money, sanitise_name, sanitise_number, sanitise_percent, sanitise_post_code,
    sanitise_title,
};
pub use status::{StatusEntry, StatusTone, status_domains, status_map};
pub use validators::{
    EMAIL_MAX_LENGTH, FieldAttr, FieldType, ValidationRule, Validator, get_attr, get_validation,
    pattern_from_regex, rule_for,
};

/// Compiles one of the crate's built-in patterns.
///
/// # Panics
///
/// Panics when a built-in pattern literal is malformed.
#[allow(clippy::panic)]
pub(crate) fn compile_pattern(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(error) => panic!("built-in pattern '{pattern}' failed to compile: {error}"),
    }
}
