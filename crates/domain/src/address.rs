//! Address records and the helpers that reshape them.
//!
//! An [`AddressRecord`] is an ordered list of `(key, value)` pairs whose key
//! order drives human rendering. Street and postal variants share the same
//! seven fields, distinguished by a six character key prefix (`Street`,
//! `Postal`).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use fieldkit_core::{AppError, AppResult};
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::compile_pattern;

/// Label of the option that lets a user enter an address by hand.
pub const MANUAL_ADDRESS_LABEL: &str = "Unable to find address?";

/// Value and normalised form of the manual entry option.
pub const MANUAL_ADDRESS_VALUE: &str = "manual address";

const REQUIRED_SUFFIXES: [&str; 4] = ["line1", "suburb", "state", "postcode"];

const TYPE_PREFIX_LENGTH: usize = 6;

const STREET_ABBREVIATIONS: [(&str, &str); 24] = [
    ("ave", "avenue"),
    ("bvd", "boulevard"),
    ("cir", "circle"),
    ("cct", "circuit"),
    ("crcs", "circus"),
    ("ct", "court"),
    ("cres", "crescent"),
    ("dr", "drive"),
    ("esp", "esplanade"),
    ("fwy", "freeway"),
    ("hwy", "highway"),
    ("ln", "lane"),
    ("mwy", "motorway"),
    ("pde", "parade"),
    ("pkwy", "parkway"),
    ("plza", "plaza"),
    ("pl", "place"),
    ("prom", "promenade"),
    ("rd", "road"),
    ("sq", "square"),
    ("stra", "strand"),
    ("st", "street"),
    ("tce", "terrace"),
    ("trl", "trail"),
];

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| compile_pattern(r"[^a-zA-Z0-9]+"));

/// Ordered address fields keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressRecord {
    fields: Vec<(String, Option<String>)>,
}

impl AddressRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: Option<String>) {
        self.fields.push((key.into(), value));
    }

    /// Returns the value stored under `key`, if it is present and non-null.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Returns the fields in order.
    #[must_use]
    pub fn fields(&self) -> &[(String, Option<String>)] {
        self.fields.as_slice()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn rename_keys(&self, rename: impl Fn(&str) -> String) -> Self {
        self.fields
            .iter()
            .map(|(key, value)| (rename(key), value.clone()))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for AddressRecord {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}

impl Serialize for AddressRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AddressRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AddressRecordVisitor)
    }
}

struct AddressRecordVisitor;

impl<'de> Visitor<'de> for AddressRecordVisitor {
    type Value = AddressRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object of address fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut record = AddressRecord {
            fields: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((key, value)) = access.next_entry::<String, Option<String>>()? {
            record.fields.push((key, value));
        }

        Ok(record)
    }
}

/// Kind of address a prefixed record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    /// Residential or business street address.
    Street,
    /// Postal address.
    Postal,
}

impl AddressKind {
    /// Returns the key prefix used for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Street => "Street",
            Self::Postal => "Postal",
        }
    }
}

impl FromStr for AddressKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "street" => Ok(Self::Street),
            "postal" => Ok(Self::Postal),
            _ => Err(AppError::Validation(format!(
                "unknown address kind '{value}'"
            ))),
        }
    }
}

/// Canonical seven part address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SevenPartAddress {
    /// First street line.
    pub line1: Option<String>,
    /// Second street line.
    pub line2: Option<String>,
    /// Third street line.
    pub line3: Option<String>,
    /// Suburb or locality.
    pub suburb: Option<String>,
    /// State or territory.
    pub state: Option<String>,
    /// Post code.
    pub postcode: Option<String>,
    /// Country.
    pub country: Option<String>,
}

impl SevenPartAddress {
    /// Builds an address from a search result label such as
    /// `"1 Main St, Town  NSW  2000"`.
    ///
    /// The country is set to `AUSTRALIA` only when line one, suburb, state
    /// and post code were all found.
    #[must_use]
    pub fn from_search_label(label: &str) -> Self {
        let parts = split_address_str(label);
        let mut address = Self::default();

        for (index, line) in parts.lines.iter().enumerate() {
            let line = non_empty(line);
            match index {
                0 => address.line1 = line,
                1 => address.line2 = line,
                2 => address.line3 = line,
                _ => tracing::debug!(index, "ignoring extra address line"),
            }
        }

        let mut locality = parts.locality.iter().map(|bit| non_empty(bit));
        address.suburb = locality.next().flatten();
        address.state = locality.next().flatten();
        address.postcode = locality.next().flatten();

        if address.has_required_parts() {
            address.country = Some("AUSTRALIA".to_owned());
        }

        address
    }

    /// Returns `true` when line one, suburb, state and post code are set.
    #[must_use]
    pub fn has_required_parts(&self) -> bool {
        self.line1.is_some()
            && self.suburb.is_some()
            && self.state.is_some()
            && self.postcode.is_some()
    }

    /// Returns the address as an unprefixed record in canonical order.
    #[must_use]
    pub fn record(&self) -> AddressRecord {
        [
            ("line1", &self.line1),
            ("line2", &self.line2),
            ("line3", &self.line3),
            ("suburb", &self.suburb),
            ("state", &self.state),
            ("postcode", &self.postcode),
            ("country", &self.country),
        ]
        .into_iter()
        .map(|(key, value)| (key, value.clone()))
        .collect()
    }

    /// Returns the address as a record with `Street`/`Postal` prefixed keys.
    #[must_use]
    pub fn to_record(&self, kind: AddressKind) -> AddressRecord {
        prefix_addr(&self.record(), kind.as_str())
    }
}

/// Address lines and locality bits split out of an address string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressStrParts {
    /// Street lines, in order.
    pub lines: Vec<String>,
    /// Suburb, state and post code, when present.
    pub locality: Vec<String>,
}

/// One address search result offered to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressOption {
    /// Identifier of the result; absent for the manual entry option.
    pub id: Option<String>,
    /// Text shown to the user.
    pub label: String,
    /// Value submitted when the option is picked.
    pub value: String,
    /// Match score reported by the provider.
    pub score: f64,
    /// Normalised form used for matching.
    pub normalised: String,
    /// `true` only for the manual entry option.
    pub manual_entry: bool,
}

impl AddressOption {
    /// Creates an option for an address returned by a search provider.
    #[must_use]
    pub fn from_match(address: &str, score: f64) -> Self {
        Self {
            id: Some(address.to_owned()),
            label: address.to_owned(),
            value: address.to_owned(),
            score,
            normalised: normalise_addr(address),
            manual_entry: false,
        }
    }

    /// Creates the option that lets a user enter an address by hand.
    #[must_use]
    pub fn manual() -> Self {
        Self {
            id: None,
            label: MANUAL_ADDRESS_LABEL.to_owned(),
            value: MANUAL_ADDRESS_VALUE.to_owned(),
            score: 0.0,
            normalised: MANUAL_ADDRESS_VALUE.to_owned(),
            manual_entry: true,
        }
    }
}

/// Returns `true` when every line one, suburb, state or post code field of
/// the record holds a non-empty value.
///
/// Keys match by suffix, case-insensitively, so prefixed records validate
/// the same way as bare ones.
#[must_use]
pub fn address_is_valid(record: &AddressRecord) -> bool {
    record.fields().iter().all(|(key, value)| {
        let key = key.to_lowercase();
        let required = REQUIRED_SUFFIXES
            .iter()
            .any(|suffix| key.ends_with(suffix));

        !required || value.as_deref().is_some_and(|value| !value.trim().is_empty())
    })
}

/// Removes the six character `Street`/`Postal` prefix from every key.
#[must_use]
pub fn strip_addr_type_prefix(record: &AddressRecord) -> AddressRecord {
    record.rename_keys(|key| {
        key.chars()
            .skip(TYPE_PREFIX_LENGTH)
            .collect::<String>()
            .to_lowercase()
    })
}

/// Prefixes every key, upper-casing the first letter of both parts.
#[must_use]
pub fn prefix_addr(record: &AddressRecord, prefix: &str) -> AddressRecord {
    let prefix = uc_first(prefix);
    record.rename_keys(|key| format!("{prefix}{}", uc_first(key)))
}

/// Replaces the first occurrence of `old` in every key with `new`.
#[must_use]
pub fn change_addr_prefix(record: &AddressRecord, old: &str, new: &str) -> AddressRecord {
    record.rename_keys(|key| key.replacen(old, new, 1))
}

/// Compares two (possibly prefixed) addresses field by field.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the records have a different number
/// of fields or when fields in the same position have different names once
/// their prefixes are removed.
pub fn address_is_same(first: &AddressRecord, second: &AddressRecord) -> AppResult<bool> {
    let first = strip_addr_type_prefix(first);
    let second = strip_addr_type_prefix(second);

    if first.len() != second.len() {
        return Err(AppError::Validation(format!(
            "addresses have a different number of fields ({} and {})",
            first.len(),
            second.len()
        )));
    }

    let mut same = true;
    for ((first_key, first_value), (second_key, second_value)) in
        first.fields().iter().zip(second.fields())
    {
        if first_key != second_key {
            return Err(AppError::Validation(format!(
                "address fields '{first_key}' and '{second_key}' are not compatible"
            )));
        }

        same &= first_value == second_value;
    }

    Ok(same)
}

/// Joins the record's non-empty values with `separator`, in field order.
#[must_use]
pub fn address_to_human(record: &AddressRecord, separator: &str) -> String {
    record
        .fields()
        .iter()
        .filter_map(|(_, value)| value.as_deref().map(str::trim))
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Lower-cases an address and replaces each run of non-alphanumeric
/// characters with one space.
#[must_use]
pub fn normalise_addr(address: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(address, " ")
        .trim()
        .to_lowercase()
}

/// Expands street type abbreviations (`st`, `rd`, `cres`, ...) that appear
/// as space delimited words inside a normalised address.
#[must_use]
pub fn expand_street_abbreviations(address: &str) -> String {
    let words: Vec<&str> = address.split(' ').collect();
    let last = words.len().saturating_sub(1);

    words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 || index == last {
                return *word;
            }

            STREET_ABBREVIATIONS
                .iter()
                .find(|(short, _)| short == word)
                .map_or(*word, |(_, full)| *full)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits an address string into street lines and locality bits.
///
/// Comma separated parts are street lines unless they contain a double
/// space, in which case their bits form the locality (suburb, state, post
/// code).
#[must_use]
pub fn split_address_str(address: &str) -> AddressStrParts {
    let mut parts = AddressStrParts::default();

    for part in address.split(',') {
        let bits: Vec<String> = part.split("  ").map(|bit| bit.trim().to_owned()).collect();

        if bits.len() > 1 {
            parts.locality = bits;
        } else {
            parts.lines.extend(bits);
        }
    }

    parts
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn uc_first(value: &str) -> String {
    let mut characters = value.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, Option<&str>)]) -> AddressRecord {
        fields
            .iter()
            .map(|(key, value)| (*key, value.map(str::to_owned)))
            .collect()
    }

    #[test]
    fn validity_checks_required_suffixes() {
        let valid = record(&[
            ("Line1", Some("1 Main St")),
            ("Suburb", Some("Town")),
            ("State", Some("NSW")),
            ("Postcode", Some("2000")),
        ]);
        assert!(address_is_valid(&valid));

        let invalid = record(&[
            ("Line1", Some("1 Main St")),
            ("Suburb", Some("Town")),
            ("State", Some("NSW")),
            ("Postcode", Some("")),
        ]);
        assert!(!address_is_valid(&invalid));

        let prefixed = record(&[("StreetLine1", None), ("StreetLine2", None)]);
        assert!(!address_is_valid(&prefixed));
    }

    #[test]
    fn human_rendering_skips_empty_values() {
        let address = record(&[
            ("line1", Some("1 Main St")),
            ("line2", None),
            ("suburb", Some("Town")),
            ("state", Some("NSW")),
            ("postcode", Some("2000")),
            ("country", None),
        ]);

        assert_eq!(address_to_human(&address, ", "), "1 Main St, Town, NSW, 2000");
        assert_eq!(address_to_human(&address, "\n").lines().count(), 4);
    }

    #[test]
    fn prefixes_round_trip() {
        let bare = record(&[("line1", Some("1 Main St")), ("postcode", Some("2000"))]);

        let street = prefix_addr(&bare, "street");
        assert_eq!(street.get("StreetLine1"), Some("1 Main St"));

        let postal = change_addr_prefix(&street, "Street", "Postal");
        assert_eq!(postal.get("PostalPostcode"), Some("2000"));

        assert_eq!(strip_addr_type_prefix(&postal), bare);
    }

    #[test]
    fn address_is_same_ignores_prefixes() {
        let street = record(&[("StreetLine1", Some("1 Main St")), ("StreetState", Some("NSW"))]);
        let postal = record(&[("PostalLine1", Some("1 Main St")), ("PostalState", Some("NSW"))]);
        let other = record(&[("PostalLine1", Some("2 Main St")), ("PostalState", Some("NSW"))]);

        assert_eq!(address_is_same(&street, &postal).ok(), Some(true));
        assert_eq!(address_is_same(&street, &other).ok(), Some(false));
    }

    #[test]
    fn address_is_same_rejects_mismatched_shapes() {
        let street = record(&[("StreetLine1", Some("1 Main St"))]);
        let longer = record(&[("PostalLine1", None), ("PostalLine2", None)]);
        let renamed = record(&[("PostalSuburb", Some("1 Main St"))]);

        assert!(matches!(
            address_is_same(&street, &longer),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            address_is_same(&street, &renamed),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn normalises_and_expands_abbreviations() {
        let normalised = normalise_addr("  12/3 Smith St., Newtown  NSW ");
        assert_eq!(normalised, "12 3 smith st newtown nsw");
        assert_eq!(
            expand_street_abbreviations(&normalised),
            "12 3 smith street newtown nsw"
        );
        assert_eq!(expand_street_abbreviations("st kilda rd"), "st kilda rd");
        assert_eq!(expand_street_abbreviations("1 town sq mall"), "1 town square mall");
    }

    #[test]
    fn splits_lines_from_locality() {
        let parts = split_address_str("Unit 1, 10 High St, Newtown  NSW  2042");

        assert_eq!(parts.lines, vec!["Unit 1", "10 High St"]);
        assert_eq!(parts.locality, vec!["Newtown", "NSW", "2042"]);
    }

    #[test]
    fn search_label_becomes_seven_part_address() {
        let address = SevenPartAddress::from_search_label("10 High St, Newtown  NSW  2042");

        assert_eq!(address.line1.as_deref(), Some("10 High St"));
        assert_eq!(address.line2, None);
        assert_eq!(address.suburb.as_deref(), Some("Newtown"));
        assert_eq!(address.postcode.as_deref(), Some("2042"));
        assert_eq!(address.country.as_deref(), Some("AUSTRALIA"));

        let record = address.to_record(AddressKind::Postal);
        assert_eq!(record.fields()[0].0, "PostalLine1");
        assert_eq!(record.len(), 7);
        assert!(address_is_valid(&record));
    }

    #[test]
    fn incomplete_label_has_no_country() {
        let address = SevenPartAddress::from_search_label("10 High St");

        assert_eq!(address.line1.as_deref(), Some("10 High St"));
        assert!(!address.has_required_parts());
        assert_eq!(address.country, None);
    }

    #[test]
    fn manual_option_is_a_sentinel() {
        let manual = AddressOption::manual();

        assert!(manual.manual_entry);
        assert_eq!(manual.label, MANUAL_ADDRESS_LABEL);
        assert_eq!(manual.normalised, MANUAL_ADDRESS_VALUE);
        assert_eq!(manual.score, 0.0);

        let found = AddressOption::from_match("10 High St, Newtown  NSW  2042", 87.0);
        assert_eq!(found.normalised, "10 high st newtown nsw 2042");
        assert!(!found.manual_entry);
    }

    #[test]
    fn address_kind_parses_case_insensitively() {
        assert_eq!(AddressKind::from_str(" STREET ").ok(), Some(AddressKind::Street));
        assert!(AddressKind::from_str("home").is_err());
    }
}
