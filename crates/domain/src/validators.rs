//! Validation rules for commonly used input fields.
//!
//! Each [`FieldType`] maps to one [`ValidationRule`] carrying the HTML pattern
//! string, the canned error message, icons and the optional sanitize/validate
//! functions consumed by form inputs. The registry is fixed at compile time
//! and built once per process.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use fieldkit_core::AppError;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::compile_pattern;
use crate::sanitisers::{
    Sanitiser, sanitise_addr_line, sanitise_aust_phone, sanitise_int_phone, sanitise_money,
    sanitise_name, sanitise_percent, sanitise_post_code, sanitise_title,
};

/// Signature of a semantic validator: `Err` carries the message to show.
pub type Validator = fn(&str) -> Result<(), &'static str>;

/// Longest email address accepted after trimming.
pub const EMAIL_MAX_LENGTH: usize = 192;

const ANY_PHONE_ERROR: &str = "Please enter a valid Australian phone number";
const FIXED_PHONE_ERROR: &str = "Please enter a valid Australian fixed line phone number";
const MOBILE_PHONE_ERROR: &str = "Please enter a valid Australian mobile phone number";
const INT_PHONE_ERROR: &str =
    "Please enter a valid international phone number (including country code)";
const EMAIL_ERROR: &str = "Please enter a valid email address";
const POSTCODE_ERROR: &str = "Please enter a valid Australian post code";
const MONEY_ERROR: &str = "Please enter a valid dollar amount";
const PERCENT_ERROR: &str = "Please enter a valid percentage";
const URL_ERROR: &str = "Please enter a valid website address (URL)";
const NAME_ERROR: &str = "Please enter a name";
const PASSWORD_ERROR: &str = "The password entered doesn't meet the requirements. \
    Please ensure it is a minimum of 8 characters and includes an uppercase letter, \
    a number and a special character.";

const ADDR_LINE_SOURCE: &str = r"^[-a-zA-Z0-9 ,.()/']+$";
const ANY_PHONE_SOURCE: &str = r"^0[234578][0-9]{8}$";
const FIXED_PHONE_SOURCE: &str = r"^0[2378][0-9]{8}$";
const MOBILE_PHONE_SOURCE: &str = r"^0[45][0-9]{8}$";
const INT_PHONE_SOURCE: &str = r"^\+[0-9]{8,14}$";
const EMAIL_SOURCE: &str =
    r"^[a-z0-9]+[-a-z0-9_.']*@[-a-z0-9]+(?:\.[-a-z0-9]+)*(?:\.[a-z]+){1,2}$";
const POSTCODE_SOURCE: &str = r"^(?:0[289][0-9]{2}|[1-9][0-9]{3})$";
const NAME_SOURCE: &str = r"^[-a-zA-Z .']+$";
const TITLE_SOURCE: &str = r"^[-a-zA-Z0-9 ,.&?:!()<>/']+$";
const PASSWORD_SOURCE: &str = r#"^[-a-zA-Z0-9 `~!@#$%^&*()_+{}|:";'<>?,./\[\]]{8,64}$"#;
const MONEY_SOURCE: &str = r"^[0-9]{1,7}(?:\.[0-9]{2})?$";
const PERCENT_SOURCE: &str = r"^[0-9]{1,3}(?:\.[0-9]{1,3})?$";
const URL_SOURCE: &str = r"^https?://[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*(?:\.[a-z]+){1,2}$";

/// Characters escaped inside character classes of a derived pattern.
const PATTERN_CLASS_SPECIALS: &str = "`~!@#$%^&*()+[]{}|?<>/";

static ANY_PHONE: LazyLock<Regex> = LazyLock::new(|| compile_pattern(ANY_PHONE_SOURCE));
static FIXED_PHONE: LazyLock<Regex> = LazyLock::new(|| compile_pattern(FIXED_PHONE_SOURCE));
static MOBILE_PHONE: LazyLock<Regex> = LazyLock::new(|| compile_pattern(MOBILE_PHONE_SOURCE));
static INT_PHONE: LazyLock<Regex> = LazyLock::new(|| compile_pattern(INT_PHONE_SOURCE));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile_pattern(EMAIL_SOURCE));
static PASSWORD: LazyLock<Regex> = LazyLock::new(|| compile_pattern(PASSWORD_SOURCE));
static PASSWORD_UPPERCASE: LazyLock<Regex> = LazyLock::new(|| compile_pattern(r"[A-Z]"));
static PASSWORD_DIGIT: LazyLock<Regex> = LazyLock::new(|| compile_pattern(r"[0-9]"));
static PASSWORD_SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r#"[`~!@#$%^&*()\-=_+/\[\]\\{}|;':",.<>?]"#));

static REGISTRY: LazyLock<HashMap<FieldType, ValidationRule>> = LazyLock::new(build_registry);

/// Field types with built-in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single street address line.
    AddressLine,
    /// Email address.
    Email,
    /// Dollar amount.
    Money,
    /// Person's name.
    Name,
    /// Account password.
    Password,
    /// Percentage.
    Percent,
    /// Australian post code.
    Postcode,
    /// Post code of a PO box address.
    PostcodePoBox,
    /// Post code of a street address.
    PostcodeStreet,
    /// Any Australian phone number.
    Tel,
    /// Australian fixed line phone number.
    TelFixed,
    /// International phone number with country code.
    TelInt,
    /// Australian mobile phone number.
    TelMobile,
    /// Title or heading text.
    Title,
    /// Website address.
    Url,
}

impl FieldType {
    /// Returns the stable tag for this field type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddressLine => "addressline",
            Self::Email => "email",
            Self::Money => "money",
            Self::Name => "name",
            Self::Password => "password",
            Self::Percent => "percent",
            Self::Postcode => "postcode",
            Self::PostcodePoBox => "postcodepobox",
            Self::PostcodeStreet => "postcodestreet",
            Self::Tel => "tel",
            Self::TelFixed => "telfixed",
            Self::TelInt => "telint",
            Self::TelMobile => "telmobile",
            Self::Title => "title",
            Self::Url => "url",
        }
    }

    /// Returns all registered field types.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[FieldType] = &[
            FieldType::AddressLine,
            FieldType::Email,
            FieldType::Money,
            FieldType::Name,
            FieldType::Password,
            FieldType::Percent,
            FieldType::Postcode,
            FieldType::PostcodePoBox,
            FieldType::PostcodeStreet,
            FieldType::Tel,
            FieldType::TelFixed,
            FieldType::TelInt,
            FieldType::TelMobile,
            FieldType::Title,
            FieldType::Url,
        ];

        ALL
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|field_type| field_type.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown field type '{value}'")))
    }
}

/// Attributes a rule can supply to an input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAttr {
    /// HTML `pattern` attribute.
    Pattern,
    /// Placeholder text.
    Placeholder,
    /// Error message shown when validation fails.
    Error,
    /// Icon rendered before the input.
    PreIcon,
    /// Icon rendered after the input.
    PostIcon,
}

impl FieldAttr {
    /// Returns the prop name used by input components.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Placeholder => "placeholder",
            Self::Error => "error",
            Self::PreIcon => "preIcon",
            Self::PostIcon => "postIcon",
        }
    }
}

impl FromStr for FieldAttr {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pattern" => Ok(Self::Pattern),
            "placeholder" => Ok(Self::Placeholder),
            "error" => Ok(Self::Error),
            "preIcon" => Ok(Self::PreIcon),
            "postIcon" => Ok(Self::PostIcon),
            _ => Err(AppError::Validation(format!(
                "unknown field attribute '{value}'"
            ))),
        }
    }
}

/// Validation settings for one field type.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    field_type: FieldType,
    pattern: String,
    matcher: Regex,
    error_message: &'static str,
    placeholder: &'static str,
    pre_icon: Option<&'static str>,
    post_icon: Option<&'static str>,
    sanitise: Option<Sanitiser>,
    validate: Option<Validator>,
}

impl ValidationRule {
    fn new(field_type: FieldType, source: &str, error_message: &'static str) -> Self {
        Self {
            field_type,
            pattern: pattern_from_regex(source),
            matcher: compile_pattern(source),
            error_message,
            placeholder: "",
            pre_icon: None,
            post_icon: None,
            sanitise: None,
            validate: None,
        }
    }

    fn with_sanitiser(mut self, sanitise: Sanitiser) -> Self {
        self.sanitise = Some(sanitise);
        self
    }

    fn with_validator(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }

    fn with_icons(mut self, pre_icon: Option<&'static str>, post_icon: Option<&'static str>) -> Self {
        self.pre_icon = pre_icon;
        self.post_icon = post_icon;
        self
    }

    /// Returns the field type this rule validates.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the HTML pattern attribute value.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the canned error message; empty when the rule has none.
    #[must_use]
    pub fn error_message(&self) -> &'static str {
        self.error_message
    }

    /// Returns the default placeholder text.
    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// Returns the icon shown before the input.
    #[must_use]
    pub fn pre_icon(&self) -> Option<&'static str> {
        self.pre_icon
    }

    /// Returns the icon shown after the input.
    #[must_use]
    pub fn post_icon(&self) -> Option<&'static str> {
        self.post_icon
    }

    /// Returns the sanitizer, if the rule defines one.
    #[must_use]
    pub fn sanitiser(&self) -> Option<Sanitiser> {
        self.sanitise
    }

    /// Returns the semantic validator, if the rule defines one.
    #[must_use]
    pub fn validator(&self) -> Option<Validator> {
        self.validate
    }

    /// Applies the rule's sanitizer, or returns the input unchanged.
    #[must_use]
    pub fn sanitise(&self, value: &str) -> String {
        match self.sanitise {
            Some(sanitise) => sanitise(value),
            None => value.to_owned(),
        }
    }

    /// Checks a value against the rule.
    ///
    /// The validator decides when present; otherwise the anchored pattern
    /// does. `Err` carries the message to display, which may be empty.
    pub fn check(&self, value: &str) -> Result<(), &'static str> {
        match self.validate {
            Some(validate) => validate(value),
            None if self.matcher.is_match(value) => Ok(()),
            None => Err(self.error_message),
        }
    }

    /// Returns the rule's value for an input attribute (may be empty).
    #[must_use]
    pub fn attr(&self, attr: FieldAttr) -> &str {
        match attr {
            FieldAttr::Pattern => self.pattern(),
            FieldAttr::Placeholder => self.placeholder,
            FieldAttr::Error => self.error_message,
            FieldAttr::PreIcon => self.pre_icon.unwrap_or_default(),
            FieldAttr::PostIcon => self.post_icon.unwrap_or_default(),
        }
    }
}

/// Looks up the validation rule for a field type tag.
///
/// Unknown tags yield `None`.
#[must_use]
pub fn get_validation(tag: &str) -> Option<&'static ValidationRule> {
    let field_type = FieldType::from_str(tag).ok()?;
    rule_for(field_type)
}

/// Returns the registered rule for a field type.
#[must_use]
pub fn rule_for(field_type: FieldType) -> Option<&'static ValidationRule> {
    REGISTRY.get(&field_type)
}

/// Resolves the effective value of an input attribute.
///
/// A non-empty prop supplied by the caller wins over the rule's default.
/// Returns `None` when neither provides a non-empty value.
#[must_use]
pub fn get_attr(
    rule: Option<&ValidationRule>,
    props: &HashMap<String, String>,
    attr: FieldAttr,
) -> Option<String> {
    if let Some(value) = props
        .get(attr.as_str())
        .filter(|value| !value.trim().is_empty())
    {
        return Some(value.clone());
    }

    rule.map(|rule| rule.attr(attr))
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
}

/// Converts a regular expression source into an HTML pattern string.
///
/// Strips a leading `^` and trailing `$`, then escapes class-special
/// characters and edge hyphens inside every unescaped `[...]` class. The
/// conversion is lossy; the result is only exposed to consumers and never
/// used for matching here.
#[must_use]
pub fn pattern_from_regex(source: &str) -> String {
    let body = source.strip_prefix('^').unwrap_or(source);
    let body = body.strip_suffix('$').unwrap_or(body);

    let characters: Vec<char> = body.chars().collect();
    let mut output = String::with_capacity(body.len() + 8);
    let mut index = 0;

    while index < characters.len() {
        let character = characters[index];
        output.push(character);
        index += 1;

        let escaped = index >= 2 && characters[index - 2] == '\\';
        if character != '[' || escaped {
            continue;
        }

        if let Some(end) = class_end(&characters, index) {
            let class: String = characters[index..end].iter().collect();
            output.push_str(&escape_class(&class));
            index = end;
        }
    }

    output
}

/// Index of the `]` closing a class whose body starts at `start`.
fn class_end(characters: &[char], start: usize) -> Option<usize> {
    let mut index = start;
    while index < characters.len() {
        match characters[index] {
            '\\' => index += 2,
            ']' => return Some(index),
            _ => index += 1,
        }
    }

    None
}

fn escape_class(class: &str) -> String {
    let mut escaped = String::with_capacity(class.len() * 2);
    let mut characters = class.chars();
    while let Some(character) = characters.next() {
        if character == '\\' {
            escaped.push(character);
            escaped.extend(characters.next());
            continue;
        }
        if PATTERN_CLASS_SPECIALS.contains(character) {
            escaped.push('\\');
        }
        escaped.push(character);
    }

    let leading = escaped.starts_with('-');
    if leading {
        escaped.remove(0);
    }
    let trailing = escaped.ends_with('-') && !escaped.ends_with("\\-");
    if trailing {
        escaped.pop();
    }

    format!(
        "{}{escaped}{}",
        if leading { "\\-" } else { "" },
        if trailing { "\\-" } else { "" }
    )
}

fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim().to_lowercase();
    if email.chars().count() > EMAIL_MAX_LENGTH {
        return Err(EMAIL_ERROR);
    }

    let parts: Vec<&str> = email.split('@').collect();
    let [local, domain] = parts.as_slice() else {
        return Err(EMAIL_ERROR);
    };

    if local.trim().is_empty() || is_invalid_email_domain(domain.trim()) {
        return Err(EMAIL_ERROR);
    }

    if EMAIL.is_match(&email) {
        Ok(())
    } else {
        Err(EMAIL_ERROR)
    }
}

fn is_invalid_email_domain(domain: &str) -> bool {
    let mut segments = domain.split(':');
    let host = segments.next().unwrap_or_default();

    segments.next().is_some()
        || host.is_empty()
        || host.contains("example")
        || host.contains("test")
        || host.contains("localhost")
        || host.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn validate_password(input: &str) -> Result<(), &'static str> {
    let acceptable = PASSWORD.is_match(input)
        && PASSWORD_UPPERCASE.is_match(input)
        && PASSWORD_DIGIT.is_match(input)
        && PASSWORD_SPECIAL.is_match(input);

    if acceptable { Ok(()) } else { Err(PASSWORD_ERROR) }
}

fn validate_any_phone(input: &str) -> Result<(), &'static str> {
    if ANY_PHONE.is_match(input) { Ok(()) } else { Err(ANY_PHONE_ERROR) }
}

fn validate_fixed_phone(input: &str) -> Result<(), &'static str> {
    if FIXED_PHONE.is_match(input) { Ok(()) } else { Err(FIXED_PHONE_ERROR) }
}

fn validate_mobile_phone(input: &str) -> Result<(), &'static str> {
    if MOBILE_PHONE.is_match(input) { Ok(()) } else { Err(MOBILE_PHONE_ERROR) }
}

fn validate_int_phone(input: &str) -> Result<(), &'static str> {
    if INT_PHONE.is_match(input) { Ok(()) } else { Err(INT_PHONE_ERROR) }
}

fn build_registry() -> HashMap<FieldType, ValidationRule> {
    let rules = [
        ValidationRule::new(FieldType::AddressLine, ADDR_LINE_SOURCE, "")
            .with_sanitiser(sanitise_addr_line),
        ValidationRule::new(FieldType::Email, EMAIL_SOURCE, EMAIL_ERROR)
            .with_validator(validate_email),
        ValidationRule::new(FieldType::Money, MONEY_SOURCE, MONEY_ERROR)
            .with_sanitiser(sanitise_money)
            .with_icons(Some("attach_money"), None),
        ValidationRule::new(FieldType::Name, NAME_SOURCE, NAME_ERROR)
            .with_sanitiser(sanitise_name),
        ValidationRule::new(FieldType::Password, PASSWORD_SOURCE, PASSWORD_ERROR)
            .with_validator(validate_password),
        ValidationRule::new(FieldType::Percent, PERCENT_SOURCE, PERCENT_ERROR)
            .with_sanitiser(sanitise_percent)
            .with_icons(None, Some("percent")),
        ValidationRule::new(FieldType::Postcode, POSTCODE_SOURCE, POSTCODE_ERROR)
            .with_sanitiser(sanitise_post_code),
        ValidationRule::new(FieldType::PostcodePoBox, POSTCODE_SOURCE, POSTCODE_ERROR)
            .with_sanitiser(sanitise_post_code),
        ValidationRule::new(FieldType::PostcodeStreet, POSTCODE_SOURCE, POSTCODE_ERROR)
            .with_sanitiser(sanitise_post_code),
        ValidationRule::new(FieldType::Tel, ANY_PHONE_SOURCE, ANY_PHONE_ERROR)
            .with_sanitiser(sanitise_aust_phone)
            .with_validator(validate_any_phone),
        ValidationRule::new(FieldType::TelFixed, FIXED_PHONE_SOURCE, FIXED_PHONE_ERROR)
            .with_sanitiser(sanitise_aust_phone)
            .with_validator(validate_fixed_phone),
        ValidationRule::new(FieldType::TelInt, INT_PHONE_SOURCE, INT_PHONE_ERROR)
            .with_sanitiser(sanitise_int_phone)
            .with_validator(validate_int_phone),
        ValidationRule::new(FieldType::TelMobile, MOBILE_PHONE_SOURCE, MOBILE_PHONE_ERROR)
            .with_sanitiser(sanitise_aust_phone)
            .with_validator(validate_mobile_phone),
        ValidationRule::new(FieldType::Title, TITLE_SOURCE, "").with_sanitiser(sanitise_title),
        ValidationRule::new(FieldType::Url, URL_SOURCE, URL_ERROR),
    ];

    rules
        .into_iter()
        .map(|rule| (rule.field_type(), rule))
        .collect()
}
