//! Maps record statuses to the icon, text and tone shown in alerts and
//! status badges.

use std::str::FromStr;

use fieldkit_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Colour family a status is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    /// Neutral brand colour.
    Brand,
    /// Something went wrong or needs action now.
    Error,
    /// Informational.
    Info,
    /// Needs attention soon.
    Warning,
    /// Done or accepted.
    Success,
}

impl StatusTone {
    /// Returns the stable tone name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }

    /// Returns the default icon for the tone.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Brand | Self::Info => "info",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "check_circle",
        }
    }
}

impl FromStr for StatusTone {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "brand" => Ok(Self::Brand),
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "success" => Ok(Self::Success),
            _ => Err(AppError::Validation(format!("unknown status tone '{value}'"))),
        }
    }
}

/// Display settings for a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// Material Symbols icon name, optionally escaped.
    pub icon: String,
    /// Short label.
    pub text: String,
    /// Tone used for colouring.
    pub colour: StatusTone,
}

#[derive(Clone, Copy)]
struct StatusStyle {
    icon: &'static str,
    text: &'static str,
    tone: StatusTone,
}

impl StatusStyle {
    const fn new(icon: &'static str, text: &'static str, tone: StatusTone) -> Self {
        Self { icon, text, tone }
    }

    const fn with_text(self, text: &'static str) -> Self {
        Self { text, ..self }
    }
}

type StatusTable = &'static [(&'static str, StatusStyle)];

const ACTION_REQUIRED: StatusStyle =
    StatusStyle::new("error", "Action required", StatusTone::Error);
const BEING_PROCESSED: StatusStyle =
    StatusStyle::new("autorenew", "Processing", StatusTone::Warning);
const CLAIMED: StatusStyle = StatusStyle::new("check_circle", "Claimed", StatusTone::Success);
const DECLINED: StatusStyle = StatusStyle::new("cancel", "Declined", StatusTone::Brand);
const DUE_NOW: StatusStyle = StatusStyle::new("error", "Due now", StatusTone::Error);
const ERROR: StatusStyle = StatusStyle::new("error", "Error", StatusTone::Error);
const SUCCESS: StatusStyle = StatusStyle::new("check_circle", "Success", StatusTone::Success);
const WARNING: StatusStyle =
    StatusStyle::new("circle_notifications", "Warning", StatusTone::Warning);

const CONSENT: StatusTable = &[
    ("due", ERROR.with_text("Due now")),
    ("complete", SUCCESS.with_text("Completed")),
];

const DETAILS: StatusTable = &[
    (
        "update",
        StatusStyle::new("error", "Please update", StatusTone::Warning),
    ),
    ("success", SUCCESS),
];

const DOCUMENT: StatusTable = &[
    ("outstanding", DUE_NOW),
    ("action required", ACTION_REQUIRED),
    ("document due", DUE_NOW),
    ("document rejected", ACTION_REQUIRED),
    (
        "creative showcase",
        StatusStyle::new("circle_notifications", "Enter today", StatusTone::Warning),
    ),
    ("being processed", BEING_PROCESSED),
    ("document being reviewed", BEING_PROCESSED),
    ("completed", SUCCESS.with_text("Completed")),
    ("confirmed", SUCCESS.with_text("Confirmed")),
    ("document approved", SUCCESS.with_text("Approved")),
    (
        "creative showcase submitted",
        StatusStyle::new("pending", "We've got it!", StatusTone::Success),
    ),
    ("creative showcase approved", SUCCESS.with_text("Entered")),
];

const GENERAL: StatusTable = &[
    ("action", ACTION_REQUIRED),
    ("claimed", CLAIMED),
    ("declined", DECLINED),
    ("error", ERROR),
    ("general", WARNING.with_text("General")),
    ("interested", CLAIMED),
    ("success", SUCCESS),
    ("warning", WARNING),
];

const OFFERS: StatusTable = &[("claimed", CLAIMED), ("declined", DECLINED)];

const PAYMENTS: StatusTable = &[
    (
        "pending",
        StatusStyle::new("pending", "Pending", StatusTone::Success),
    ),
    ("failed", ERROR.with_text("Failed")),
    ("paid", SUCCESS.with_text("Paid")),
    ("rejected", ERROR.with_text("Failed")),
    (
        "onhold",
        StatusStyle::new("warning", "On hold", StatusTone::Warning),
    ),
];

const DOMAINS: &[(&str, StatusTable)] = &[
    ("consent", CONSENT),
    ("details", DETAILS),
    ("document", DOCUMENT),
    ("general", GENERAL),
    ("offers", OFFERS),
    ("payments", PAYMENTS),
];

const FLAT: StatusTable = &[
    ("action required", ACTION_REQUIRED),
    ("being processed", BEING_PROCESSED),
    ("claimed", CLAIMED),
    ("due now", DUE_NOW),
    ("error", ERROR),
    ("success", SUCCESS),
    ("warning", WARNING),
];

/// Returns the names of the status domains with their own tables.
#[must_use]
pub fn status_domains() -> Vec<&'static str> {
    DOMAINS.iter().map(|(name, _)| *name).collect()
}

/// Looks up the display settings for a status.
///
/// Both arguments are trimmed and lower-cased. The domain's own table is
/// consulted first, then the shared table of generic statuses. With
/// `escape` set, icon names have `\` inserted before underscores that
/// follow a lowercase letter.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] when neither table knows the status.
pub fn status_map(status_type: &str, status: &str, escape: bool) -> AppResult<StatusEntry> {
    let status_type = status_type.trim().to_lowercase();
    let status = status.trim().to_lowercase();

    let style = DOMAINS
        .iter()
        .find(|(name, _)| *name == status_type)
        .and_then(|(_, table)| find_style(table, &status))
        .or_else(|| find_style(FLAT, &status))
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "no status style for type '{status_type}' and status '{status}'"
            ))
        })?;

    let icon = if escape {
        escape_icon(style.icon)
    } else {
        style.icon.to_owned()
    };

    Ok(StatusEntry {
        icon,
        text: style.text.to_owned(),
        colour: style.tone,
    })
}

fn find_style(table: StatusTable, status: &str) -> Option<StatusStyle> {
    table
        .iter()
        .find(|(name, _)| *name == status)
        .map(|(_, style)| *style)
}

fn escape_icon(icon: &str) -> String {
    let mut escaped = String::with_capacity(icon.len() + 2);
    let mut characters = icon.chars().peekable();

    while let Some(character) = characters.next() {
        escaped.push(character);
        if character.is_ascii_lowercase() && characters.peek() == Some(&'_') {
            escaped.push('\\');
        }
    }

    escaped
}
