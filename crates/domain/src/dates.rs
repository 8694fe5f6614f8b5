//! Calendar helpers behind three-part (day, month, year) date inputs.
//!
//! Dates are handled as calendar dates (`NaiveDate`). Millisecond timestamps
//! are interpreted in UTC.

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use fieldkit_core::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::compile_pattern;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

const YEAR_MILLIS: f64 = 31_557_600_000.0;
const MONTH_MILLIS: f64 = 2_629_800_000.0;
const WEEK_MILLIS: f64 = 604_800_000.0;
const DAY_MILLIS: f64 = 86_400_000.0;

static ISO_8601: LazyLock<Regex> = LazyLock::new(|| {
    compile_pattern(
        r"(?i)^[0-9]{4}(?:-[0-9]{2}){2}(?:T[0-9]{2}(?::[0-9]{2}){2}(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:[0-9]{2})?)?$",
    )
});

/// Day, month and year entered separately; a `None` part is not yet a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    /// Day of the month.
    pub day: Option<i64>,
    /// Month of the year, starting at 1.
    pub month: Option<i64>,
    /// Full year.
    pub year: Option<i64>,
}

impl DateParts {
    /// Creates parts with every component set.
    #[must_use]
    pub fn new(day: i64, month: i64, year: i64) -> Self {
        Self {
            day: Some(day),
            month: Some(month),
            year: Some(year),
        }
    }

    /// Reads parts from an ISO 8601 date or date-time string.
    #[must_use]
    pub fn from_iso_str(input: &str) -> Option<Self> {
        parse_date(input).map(Self::from)
    }

    /// Reads parts from a millisecond timestamp (UTC).
    #[must_use]
    pub fn from_timestamp_millis(timestamp: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(timestamp).map(|moment| Self::from(moment.date_naive()))
    }

    /// Returns `true` when every part holds a number.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.day.is_some() && self.month.is_some() && self.year.is_some()
    }
}

impl From<NaiveDate> for DateParts {
    fn from(date: NaiveDate) -> Self {
        Self::new(
            i64::from(date.day()),
            i64::from(date.month()),
            i64::from(date.year()),
        )
    }
}

/// Lower or upper bound of an acceptable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum DateLimit {
    /// Calendar date; also bounds the year part.
    Date(NaiveDate),
    /// Millisecond timestamp; compared against the parts' UTC midnight.
    Timestamp(i64),
}

impl DateLimit {
    fn year(&self) -> Option<i32> {
        match self {
            Self::Date(date) => Some(date.year()),
            Self::Timestamp(_) => None,
        }
    }

    fn compare(&self, date: NaiveDate) -> Ordering {
        match self {
            Self::Date(limit) => date.cmp(limit),
            Self::Timestamp(limit) => utc_midnight_millis(date).cmp(limit),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Date(limit) => human_date(*limit, false),
            Self::Timestamp(limit) => DateTime::from_timestamp_millis(*limit)
                .map(|moment| human_date(moment.date_naive(), false))
                .unwrap_or_else(|| limit.to_string()),
        }
    }
}

/// Whether a date error is below or above the acceptable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateDirection {
    /// Value is too small or too early.
    Under,
    /// Value is too large or too late.
    Over,
}

/// Reason a complete set of date parts is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Day is below 1.
    #[error("Day value must be greater than or equal to 1")]
    DayTooSmall,
    /// Month is below 1.
    #[error("Month value must be greater than or equal to 1")]
    MonthTooSmall,
    /// Month is above 12.
    #[error("Month value must be less than or equal to 12")]
    MonthTooLarge,
    /// Year is before the minimum date's year.
    #[error("Year value must be greater than or equal to {min}")]
    YearTooSmall {
        /// Smallest acceptable year.
        min: i32,
    },
    /// Year is after the maximum date's year.
    #[error("Year value must be less than or equal to {max}")]
    YearTooLarge {
        /// Largest acceptable year.
        max: i32,
    },
    /// Year cannot form a supported calendar date.
    #[error("Year value {year} is out of range")]
    YearOutOfRange {
        /// Year entered.
        year: i64,
    },
    /// Day does not exist in the month.
    #[error("Day value must be less than or equal to {max_day}")]
    DayTooLarge {
        /// Last day of the month.
        max_day: u32,
    },
    /// Date is earlier than the minimum.
    #[error("Date ({date}) is earlier than the minimum allowed ({min})")]
    BeforeMin {
        /// Human readable date entered.
        date: String,
        /// Human readable minimum.
        min: String,
    },
    /// Date is later than the maximum.
    #[error("Date ({date}) is later than the maximum allowed ({max})")]
    AfterMax {
        /// Human readable date entered.
        date: String,
        /// Human readable maximum.
        max: String,
    },
}

impl DateError {
    /// Returns which side of the acceptable range was violated.
    #[must_use]
    pub fn direction(&self) -> DateDirection {
        match self {
            Self::DayTooSmall
            | Self::MonthTooSmall
            | Self::YearTooSmall { .. }
            | Self::BeforeMin { .. } => DateDirection::Under,
            Self::YearOutOfRange { year } if *year < 1 => DateDirection::Under,
            Self::MonthTooLarge
            | Self::YearTooLarge { .. }
            | Self::YearOutOfRange { .. }
            | Self::DayTooLarge { .. }
            | Self::AfterMax { .. } => DateDirection::Over,
        }
    }
}

/// Outcome of checking date parts against optional limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCheck {
    /// At least one part is missing, so there is nothing to check yet.
    Incomplete,
    /// The parts are complete but not acceptable.
    Invalid(DateError),
    /// The parts form an acceptable date.
    Valid,
}

impl DateCheck {
    /// Returns `true` for [`DateCheck::Valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Checks date parts against optional minimum and maximum limits.
#[must_use]
pub fn get_date_error(
    parts: &DateParts,
    min: Option<DateLimit>,
    max: Option<DateLimit>,
) -> DateCheck {
    let (Some(day), Some(month), Some(year)) = (parts.day, parts.month, parts.year) else {
        return DateCheck::Incomplete;
    };

    if day < 1 {
        return DateCheck::Invalid(DateError::DayTooSmall);
    }
    if month < 1 {
        return DateCheck::Invalid(DateError::MonthTooSmall);
    }
    if month > 12 {
        return DateCheck::Invalid(DateError::MonthTooLarge);
    }

    if let Some(min_year) = min.as_ref().and_then(DateLimit::year)
        && year < i64::from(min_year)
    {
        return DateCheck::Invalid(DateError::YearTooSmall { min: min_year });
    }
    if let Some(max_year) = max.as_ref().and_then(DateLimit::year)
        && year > i64::from(max_year)
    {
        return DateCheck::Invalid(DateError::YearTooLarge { max: max_year });
    }

    let Some(max_day) = u32::try_from(month)
        .ok()
        .zip(i32::try_from(year).ok())
        .and_then(|(month, year)| days_in_month(month, year))
    else {
        return DateCheck::Invalid(DateError::YearOutOfRange { year });
    };
    if day > i64::from(max_day) {
        return DateCheck::Invalid(DateError::DayTooLarge { max_day });
    }

    let Some(date) = date_from_parts(parts) else {
        return DateCheck::Invalid(DateError::YearOutOfRange { year });
    };

    if let Some(limit) = min
        && limit.compare(date) == Ordering::Less
    {
        return DateCheck::Invalid(DateError::BeforeMin {
            date: human_date(date, false),
            min: limit.describe(),
        });
    }
    if let Some(limit) = max
        && limit.compare(date) == Ordering::Greater
    {
        return DateCheck::Invalid(DateError::AfterMax {
            date: human_date(date, false),
            max: limit.describe(),
        });
    }

    DateCheck::Valid
}

/// Returns the number of days in `month` (1-12) of `year`.
#[must_use]
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }

    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

/// Assembles a calendar date from its parts.
///
/// Only the first four characters of the year are used. Returns `None` and
/// logs a warning when the parts do not form a real date.
#[must_use]
pub fn date_from_parts(parts: &DateParts) -> Option<NaiveDate> {
    let date = assemble_date(parts);
    if date.is_none() {
        tracing::warn!(?parts, "date parts do not form a valid date");
    }

    date
}

fn assemble_date(parts: &DateParts) -> Option<NaiveDate> {
    let year: String = parts.year?.to_string().chars().take(4).collect();
    let year = year.parse::<i32>().ok()?;
    let month = u32::try_from(parts.month?).ok()?;
    let day = u32::try_from(parts.day?).ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Renders date parts as a local ISO string, or `""` when they are invalid.
#[must_use]
pub fn iso_from_parts(parts: &DateParts, date_only: bool) -> String {
    date_from_parts(parts)
        .map(|date| local_iso_date(date, date_only))
        .unwrap_or_default()
}

/// Renders a date as `YYYY-MM-DDT00:00:00`, or `YYYY-MM-DD` when
/// `date_only` is set.
#[must_use]
pub fn local_iso_date(date: NaiveDate, date_only: bool) -> String {
    let day = date.format("%Y-%m-%d");
    if date_only {
        day.to_string()
    } else {
        format!("{day}T00:00:00")
    }
}

/// Returns the UTC `YYYY-MM-DD` date `offset` units away from `now`.
///
/// `unit` is one of `year`, `month`, `week` or `day`, in any case and with
/// an optional trailing `s`. Years and months use average lengths
/// (365.25 and 30.44 days). `now` defaults to the current time.
pub fn get_relative_iso_date(offset: f64, unit: &str, now: Option<i64>) -> AppResult<String> {
    let unit = unit.trim().to_lowercase();
    let multiplier = match unit.strip_suffix('s').unwrap_or(&unit) {
        "year" => YEAR_MILLIS,
        "month" => MONTH_MILLIS,
        "week" => WEEK_MILLIS,
        "day" => DAY_MILLIS,
        _ => {
            return Err(AppError::Validation(format!(
                "unknown date unit '{unit}', expected year, month, week or day"
            )));
        }
    };

    if !offset.is_finite() {
        return Err(AppError::Validation(
            "date offset must be a finite number".to_owned(),
        ));
    }

    let now = now.unwrap_or_else(|| Utc::now().timestamp_millis());
    let when = (now as f64 + multiplier * offset).trunc();

    if when.abs() > i64::MAX as f64 {
        return Err(AppError::Validation(format!(
            "date offset {offset} {unit} is out of range"
        )));
    }

    DateTime::from_timestamp_millis(when as i64)
        .map(|moment| moment.format("%Y-%m-%d").to_string())
        .ok_or_else(|| AppError::Validation(format!("date offset {offset} {unit} is out of range")))
}

/// Returns `true` when `input` is an ISO 8601 date or date-time string.
#[must_use]
pub fn is_iso8601_str(input: &str) -> bool {
    !input.is_empty() && ISO_8601.is_match(input)
}

/// Parses an ISO 8601 date or date-time string into a calendar date.
///
/// Date-times with an offset resolve to their UTC date; date-times without
/// one keep the date as written.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    if !is_iso8601_str(input) {
        return None;
    }

    let normalised = input.to_ascii_uppercase();
    if normalised.len() == 10 {
        return NaiveDate::parse_from_str(&normalised, "%Y-%m-%d").ok();
    }

    if normalised.ends_with('Z') || normalised[10..].contains(['+', '-']) {
        return DateTime::parse_from_rfc3339(&normalised)
            .ok()
            .map(|moment| moment.with_timezone(&Utc).date_naive());
    }

    NaiveDateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|moment| moment.date())
}

/// Formats a date the way en-AU locales do: `5 March 2024` or `5 Mar 2024`.
#[must_use]
pub fn human_date(date: NaiveDate, short_month: bool) -> String {
    let index = date.month0() as usize;
    let month = if short_month {
        SHORT_MONTHS[index]
    } else {
        MONTHS[index]
    };

    format!("{} {month} {}", date.day(), date.year())
}

/// Returns the full English name of month `month` (1-12).
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTHS.get(index).copied()
}

/// Returns the full English month names, January first.
#[must_use]
pub fn months() -> &'static [&'static str; 12] {
    &MONTHS
}

fn utc_midnight_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| panic!("test date"))
    }

    #[test]
    fn missing_part_is_incomplete() {
        let parts = DateParts {
            day: Some(1),
            month: None,
            year: Some(2024),
        };

        assert_eq!(get_date_error(&parts, None, None), DateCheck::Incomplete);
    }

    #[test]
    fn leap_day_depends_on_year() {
        assert_eq!(
            get_date_error(&DateParts::new(29, 2, 2023), None, None),
            DateCheck::Invalid(DateError::DayTooLarge { max_day: 28 })
        );
        assert_eq!(
            get_date_error(&DateParts::new(29, 2, 2024), None, None),
            DateCheck::Valid
        );
    }

    #[test]
    fn unrepresentable_years_are_invalid() {
        let check = |day, month, year| get_date_error(&DateParts::new(day, month, year), None, None);

        let beyond_calendar = check(1, 1, 300_000);
        assert_eq!(
            beyond_calendar,
            DateCheck::Invalid(DateError::YearOutOfRange { year: 300_000 })
        );
        let DateCheck::Invalid(error) = beyond_calendar else {
            panic!("expected an invalid date");
        };
        assert_eq!(error.direction(), DateDirection::Over);
        assert_eq!(error.to_string(), "Year value 300000 is out of range");

        assert_eq!(
            check(1, 1, i64::from(i32::MAX) + 1),
            DateCheck::Invalid(DateError::YearOutOfRange {
                year: i64::from(i32::MAX) + 1
            })
        );
        assert_eq!(
            check(29, 2, 10_004),
            DateCheck::Invalid(DateError::YearOutOfRange { year: 10_004 })
        );
    }

    #[test]
    fn part_ranges_are_checked_in_order() {
        let check = |day, month| get_date_error(&DateParts::new(day, month, 2024), None, None);

        assert_eq!(check(0, 13), DateCheck::Invalid(DateError::DayTooSmall));
        assert_eq!(check(1, 0), DateCheck::Invalid(DateError::MonthTooSmall));
        assert_eq!(check(1, 13), DateCheck::Invalid(DateError::MonthTooLarge));
    }

    #[test]
    fn calendar_limits_bound_the_year() {
        let min = Some(DateLimit::Date(date(2021, 1, 1)));
        let max = Some(DateLimit::Date(date(2030, 6, 30)));

        let early = get_date_error(&DateParts::new(15, 6, 2020), min, max);
        assert_eq!(early, DateCheck::Invalid(DateError::YearTooSmall { min: 2021 }));

        let late = get_date_error(&DateParts::new(1, 1, 2031), min, max);
        assert_eq!(late, DateCheck::Invalid(DateError::YearTooLarge { max: 2030 }));

        let after = get_date_error(&DateParts::new(1, 7, 2030), min, max);
        assert_eq!(
            after,
            DateCheck::Invalid(DateError::AfterMax {
                date: "1 July 2030".to_owned(),
                max: "30 June 2030".to_owned(),
            })
        );
    }

    #[test]
    fn timestamp_limit_compares_dates_only() {
        let min = Some(DateLimit::Timestamp(utc_midnight_millis(date(2021, 1, 1))));
        let check = get_date_error(&DateParts::new(15, 6, 2020), min, None);

        let DateCheck::Invalid(error) = check else {
            panic!("expected an invalid date");
        };

        assert_eq!(error.direction(), DateDirection::Under);
        assert_eq!(
            error.to_string(),
            "Date (15 June 2020) is earlier than the minimum allowed (1 January 2021)"
        );
        assert!(get_date_error(&DateParts::new(1, 1, 2021), min, None).is_valid());
    }

    #[test]
    fn days_in_month_handles_december_and_leap_years() {
        assert_eq!(days_in_month(12, 2023), Some(31));
        assert_eq!(days_in_month(2, 2000), Some(29));
        assert_eq!(days_in_month(2, 1900), Some(28));
        assert_eq!(days_in_month(4, 2024), Some(30));
        assert_eq!(days_in_month(13, 2024), None);
    }

    #[test]
    fn date_from_parts_truncates_long_years() {
        assert_eq!(
            date_from_parts(&DateParts::new(5, 3, 202_499)),
            Some(date(2024, 3, 5))
        );
        assert_eq!(date_from_parts(&DateParts::new(31, 4, 2024)), None);
    }

    #[test]
    fn iso_from_parts_formats_or_returns_empty() {
        let parts = DateParts::new(5, 3, 2024);

        assert_eq!(iso_from_parts(&parts, false), "2024-03-05T00:00:00");
        assert_eq!(iso_from_parts(&parts, true), "2024-03-05");
        assert_eq!(iso_from_parts(&DateParts::new(30, 2, 2024), true), "");
    }

    #[test]
    fn relative_dates_use_average_lengths() {
        let relative = |offset, unit| get_relative_iso_date(offset, unit, Some(0)).ok();

        assert_eq!(relative(1.0, "day").as_deref(), Some("1970-01-02"));
        assert_eq!(relative(2.0, " Weeks ").as_deref(), Some("1970-01-15"));
        assert_eq!(relative(1.0, "YEARS").as_deref(), Some("1971-01-01"));
        assert_eq!(relative(-1.0, "month").as_deref(), Some("1969-12-01"));
    }

    #[test]
    fn relative_date_rejects_unknown_unit() {
        assert!(matches!(
            get_relative_iso_date(1.0, "fortnight", Some(0)),
            Err(AppError::Validation(_))
        ));
        assert!(get_relative_iso_date(f64::NAN, "day", Some(0)).is_err());
    }

    #[test]
    fn detects_iso_strings() {
        assert!(is_iso8601_str("2024-03-05"));
        assert!(is_iso8601_str("2024-03-05T10:20:30.123Z"));
        assert!(is_iso8601_str("2024-03-05t10:20:30+10:00"));
        assert!(!is_iso8601_str("2024-3-5"));
        assert!(!is_iso8601_str("05/03/2024"));
        assert!(!is_iso8601_str(""));
    }

    #[test]
    fn parse_date_resolves_offsets_to_utc() {
        assert_eq!(parse_date("2024-03-05"), Some(date(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05T23:30:00"), Some(date(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05T02:00:00+10:00"), Some(date(2024, 3, 4)));
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn parts_from_other_representations() {
        assert_eq!(
            DateParts::from_iso_str("2024-03-05T10:00:00Z"),
            Some(DateParts::new(5, 3, 2024))
        );
        assert_eq!(
            DateParts::from_timestamp_millis(86_400_000),
            Some(DateParts::new(2, 1, 1970))
        );
        assert!(!DateParts::default().is_complete());
    }

    #[test]
    fn human_dates_match_en_au() {
        assert_eq!(human_date(date(2024, 3, 5), false), "5 March 2024");
        assert_eq!(human_date(date(2024, 9, 12), true), "12 Sept 2024");
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(months().len(), 12);
    }
}
