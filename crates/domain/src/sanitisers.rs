//! Pure sanitizers for raw form input.
//!
//! Each sanitizer strips or normalises characters a field type does not
//! accept. All of them are idempotent: feeding a sanitizer its own output
//! returns that output unchanged.

use std::sync::LazyLock;

use regex::Regex;

use crate::compile_pattern;

/// Signature shared by every field sanitizer.
pub type Sanitiser = fn(&str) -> String;

/// Maximum number of characters kept for Australian phone numbers.
pub const AUST_PHONE_MAX_LENGTH: usize = 10;

/// Maximum number of characters kept for international phone numbers.
pub const INT_PHONE_MAX_LENGTH: usize = 15;

/// Maximum number of characters kept for Australian post codes.
pub const POST_CODE_MAX_LENGTH: usize = 4;

/// Maximum number of characters kept for dollar amounts.
pub const MONEY_MAX_LENGTH: usize = 10;

/// Maximum number of characters kept for percentages.
pub const PERCENT_MAX_LENGTH: usize = 7;

static ADDR_LINE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"[^-a-zA-Z0-9 ,.()/']+"));

static NAME_DISALLOWED: LazyLock<Regex> = LazyLock::new(|| compile_pattern(r"[^a-zA-Z .'-]+"));

static TITLE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"[^a-zA-Z0-9&, _.?:!'()-]+"));

static MONEY_EXTRACT: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"^.*?([0-9]{1,7}(?:\.[0-9]{2})?).*$"));

static PERCENT_EXTRACT: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"^.*?([0-9]{1,3}(?:\.[0-9]{1,3})?).*$"));

/// Removes everything but digits from an Australian phone number and caps it
/// at ten digits.
#[must_use]
pub fn sanitise_aust_phone(input: &str) -> String {
    truncate_chars(&digits_only(input), AUST_PHONE_MAX_LENGTH)
}

/// Keeps digits and a single leading `+` of an international phone number.
#[must_use]
pub fn sanitise_int_phone(input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    for character in input.chars() {
        if character.is_ascii_digit() || (character == '+' && output.is_empty()) {
            output.push(character);
        }
    }

    truncate_chars(&output, INT_PHONE_MAX_LENGTH)
}

/// Strips characters that cannot appear in a street address line.
#[must_use]
pub fn sanitise_addr_line(input: &str) -> String {
    ADDR_LINE_DISALLOWED.replace_all(input, "").into_owned()
}

/// Normalises a person's name.
///
/// Disallowed character runs become a single space, repeated punctuation
/// collapses to one instance and mixed punctuation runs are cut to three
/// characters.
#[must_use]
pub fn sanitise_name(input: &str) -> String {
    let spaced = NAME_DISALLOWED.replace_all(input, " ");
    let collapsed = collapse_repeated(&spaced, is_name_punctuation);

    limit_runs(&collapsed, is_name_punctuation, 3)
}

/// Sanitises any positive whole number.
///
/// Non-digits and superfluous leading zeros are removed, then each
/// `(pattern, replacement)` rule is applied once in order. The result is cut
/// to `max_length` characters when `max_length` is non-zero.
#[must_use]
pub fn sanitise_number(input: &str, extras: &[(&Regex, &str)], max_length: usize) -> String {
    let digits = digits_only(input);
    let mut output = strip_leading_zeros(&digits).to_owned();

    for (pattern, replacement) in extras {
        output = pattern.replace(&output, *replacement).into_owned();
    }

    if max_length > 0 {
        truncate_chars(&output, max_length)
    } else {
        output
    }
}

/// Sanitises a dollar amount.
#[must_use]
pub fn sanitise_money(input: &str) -> String {
    sanitise_number(input, &[(&MONEY_EXTRACT, "${1}")], MONEY_MAX_LENGTH)
}

/// Sanitises a percentage.
#[must_use]
pub fn sanitise_percent(input: &str) -> String {
    sanitise_number(input, &[(&PERCENT_EXTRACT, "${1}")], PERCENT_MAX_LENGTH)
}

/// Removes everything but digits from an Australian post code and caps it at
/// four digits.
#[must_use]
pub fn sanitise_post_code(input: &str) -> String {
    truncate_chars(&digits_only(input), POST_CODE_MAX_LENGTH)
}

/// Strips characters not allowed in a title and collapses repeated
/// punctuation.
#[must_use]
pub fn sanitise_title(input: &str) -> String {
    let stripped = TITLE_DISALLOWED.replace_all(input, "");

    collapse_repeated(&stripped, is_title_punctuation)
}

fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

// An all-zero value keeps its zeros.
fn strip_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { digits } else { trimmed }
}

fn is_name_punctuation(character: char) -> bool {
    matches!(character, '-' | ' ' | '.' | '\'')
}

fn is_title_punctuation(character: char) -> bool {
    matches!(
        character,
        '&' | ',' | ' ' | '-' | '_' | '.' | '?' | ':' | '!' | '\'' | '(' | ')'
    )
}

/// Drops a target character when it repeats the character just before it.
fn collapse_repeated(input: &str, is_target: fn(char) -> bool) -> String {
    let mut output = String::with_capacity(input.len());
    let mut previous = None;

    for character in input.chars() {
        if is_target(character) && previous == Some(character) {
            continue;
        }

        output.push(character);
        previous = Some(character);
    }

    output
}

/// Keeps at most `max_run` consecutive target characters.
fn limit_runs(input: &str, is_target: fn(char) -> bool, max_run: usize) -> String {
    let mut output = String::with_capacity(input.len());
    let mut run = 0_usize;

    for character in input.chars() {
        if is_target(character) {
            run += 1;
            if run > max_run {
                continue;
            }
        } else {
            run = 0;
        }

        output.push(character);
    }

    output
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn aust_phone_keeps_first_ten_digits() {
        assert_eq!(sanitise_aust_phone("(02) 9999-9999 ext"), "0299999999");
        assert_eq!(sanitise_aust_phone("0412 345 678 99"), "0412345678");
    }

    #[test]
    fn int_phone_keeps_only_leading_plus() {
        assert_eq!(sanitise_int_phone("+61 (4) 1234+5678"), "+61412345678");
        assert_eq!(sanitise_int_phone("61+2"), "612");
        assert_eq!(sanitise_int_phone("++4412345678901234"), "+44123456789012");
    }

    #[test]
    fn addr_line_strips_every_disallowed_run() {
        assert_eq!(
            sanitise_addr_line("Unit 4/12 O'Brien St. #3 @home"),
            "Unit 4/12 O'Brien St. 3 home"
        );
    }

    #[test]
    fn name_collapses_punctuation() {
        assert_eq!(sanitise_name("Mary--Jane  O''Neil"), "Mary-Jane O'Neil");
        assert_eq!(sanitise_name("J0hn"), "J hn");
        assert_eq!(sanitise_name("Ann -.-. Lee"), "Ann -.Lee");
        assert_eq!(sanitise_name("a.-'.-b"), "a.-'b");
    }

    #[test]
    fn number_strips_leading_zeros_but_keeps_zero() {
        assert_eq!(sanitise_number("00120", &[], 0), "120");
        assert_eq!(sanitise_number("000", &[], 0), "000");
        assert_eq!(sanitise_number("$1,234", &[], 3), "123");
    }

    #[test]
    fn money_extracts_leading_digits() {
        assert_eq!(sanitise_money("$1,250"), "1250");
        assert_eq!(sanitise_money("123456789"), "1234567");
        assert_eq!(sanitise_money("$0050"), "50");
    }

    #[test]
    fn percent_extracts_three_digits() {
        assert_eq!(sanitise_percent("45%"), "45");
        assert_eq!(sanitise_percent("12345"), "123");
    }

    #[test]
    fn post_code_keeps_four_digits() {
        assert_eq!(sanitise_post_code("NSW 2000"), "2000");
        assert_eq!(sanitise_post_code("260012"), "2600");
    }

    #[test]
    fn title_strips_and_collapses() {
        assert_eq!(sanitise_title("Hello!!  World <b>"), "Hello! World b");
        assert_eq!(sanitise_title("Q&&A: (draft)"), "Q&A: (draft)");
    }

    #[test]
    fn empty_input_stays_empty() {
        let sanitisers: [Sanitiser; 8] = [
            sanitise_aust_phone,
            sanitise_int_phone,
            sanitise_addr_line,
            sanitise_name,
            sanitise_money,
            sanitise_percent,
            sanitise_post_code,
            sanitise_title,
        ];

        for sanitiser in sanitisers {
            assert_eq!(sanitiser(""), "");
        }
    }

    proptest! {
        #[test]
        fn aust_phone_is_idempotent(input in ".{0,40}") {
            let once = sanitise_aust_phone(&input);
            prop_assert_eq!(sanitise_aust_phone(&once), once);
        }

        #[test]
        fn int_phone_is_idempotent(input in "[+0-9 ()a-z-]{0,40}") {
            let once = sanitise_int_phone(&input);
            prop_assert_eq!(sanitise_int_phone(&once), once);
        }

        #[test]
        fn addr_line_is_idempotent(input in ".{0,40}") {
            let once = sanitise_addr_line(&input);
            prop_assert_eq!(sanitise_addr_line(&once), once);
        }

        #[test]
        fn name_is_idempotent(input in "[a-zA-Z0-9 .'_#-]{0,40}") {
            let once = sanitise_name(&input);
            prop_assert_eq!(sanitise_name(&once), once);
        }

        #[test]
        fn money_is_idempotent(input in "[0-9$,. ]{0,20}") {
            let once = sanitise_money(&input);
            prop_assert_eq!(sanitise_money(&once), once);
        }

        #[test]
        fn percent_is_idempotent(input in "[0-9%. ]{0,20}") {
            let once = sanitise_percent(&input);
            prop_assert_eq!(sanitise_percent(&once), once);
        }

        #[test]
        fn post_code_is_idempotent(input in ".{0,20}") {
            let once = sanitise_post_code(&input);
            prop_assert_eq!(sanitise_post_code(&once), once);
        }

        #[test]
        fn title_is_idempotent(input in ".{0,40}") {
            let once = sanitise_title(&input);
            prop_assert_eq!(sanitise_title(&once), once);
        }
    }
}
