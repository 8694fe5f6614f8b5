//! Small HTML and string post-processing helpers for rich text content.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::compile_pattern;

static SPAN_IN_P: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"(?is)<p>\s*<span>(.*?)</span>\s*</p>"));

static DOUBLE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"(?is)<br ?/?>\s*<br ?/?>"));

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"<p>([^<]+)<br ?/?>\s*<br ?/?>\s*"));

static P_IN_LI: LazyLock<Regex> = LazyLock::new(|| {
    compile_pattern(r"(?is)(?:(<li(?: [^>]+)?>)\s*<p(?: [^>]+)?>|</p>\s*(</li>))")
});

static ERROR_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| compile_pattern(r"(?i)<p>(?:<strong>)?(.*?)(?:</strong>)?</p>"));

static CONTROL_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile_pattern(r"[\r\n\t]+"));

/// Heading and body of an HTML error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorMsgParts {
    /// Text of the first non-empty paragraph.
    pub heading: String,
    /// Remaining non-empty paragraphs, as HTML.
    pub body: String,
}

/// Turns double line breaks inside paragraphs into paragraph boundaries.
///
/// A `<span>` that wraps a whole paragraph's content is unwrapped first.
#[must_use]
pub fn br_br_to_p(input: &str) -> String {
    let breaks = DOUBLE_BREAK.find_iter(input).count();
    let mut output = SPAN_IN_P.replace_all(input, "<p>${1}</p>").into_owned();

    for _ in 0..breaks {
        output = PARAGRAPH_BREAK
            .replace_all(&output, "<p>${1}</p><p>")
            .into_owned();
    }

    output
}

/// Removes paragraph tags wrapping the content of list items.
#[must_use]
pub fn strip_p_in_li(input: &str) -> String {
    P_IN_LI.replace_all(input, "${1}${2}").into_owned()
}

/// Joins items with commas, using `final_join` before the last item.
///
/// `["a", "b", "c"]` with `"&"` becomes `"a, b & c"`.
#[must_use]
pub fn str_array_to_human_str<S: AsRef<str>>(items: &[S], final_join: &str) -> String {
    let mut output = items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    if let Some(position) = output.rfind(',')
        && position + 1 < output.len()
    {
        output.replace_range(position..=position, &format!(" {final_join}"));
    }

    output
}

/// Splits an HTML error message into its heading (first non-empty
/// paragraph) and body (every later non-empty paragraph).
#[must_use]
pub fn split_error_msg(input: &str) -> ErrorMsgParts {
    let mut parts = ErrorMsgParts::default();

    for captures in ERROR_PARAGRAPH.captures_iter(input) {
        let text = captures.get(1).map_or("", |text| text.as_str());
        let text = CONTROL_WHITESPACE.replace(text, "");
        let text = text.trim();

        if text.is_empty() {
            continue;
        }

        if parts.heading.is_empty() {
            parts.heading = text.to_owned();
        } else if let Some(paragraph) = captures.get(0) {
            parts.body.push_str(paragraph.as_str());
        }
    }

    parts
}
