//! Human readable labels for object keys

use regex::Regex;
use std::sync::LazyLock;

static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid lower/upper pattern"));

// Word boundaries are ASCII-only, so accented letters do not join a word
static ACRONYM_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)([A-Z]+)([A-Z])([a-z])").expect("valid acronym pattern")
});

/// Turn a camelCase key into a spaced, capitalized label
///
/// `withDate` becomes `With Date`, `HTMLParser` becomes `HTML Parser`.
/// Only the first acronym boundary is split.
pub fn format_label(key: &str) -> String {
    let spaced = LOWER_UPPER.replace_all(key, "${1} ${2}");
    let split = ACRONYM_WORD.replacen(&spaced, 1, "${1} ${2}${3}");
    capitalize_first(&split)
}

/// Whether a formatted label asks for its value to be shown as a date
///
/// This is a naming convention only; the value's type plays no part.
pub fn mentions_date(label: &str) -> bool {
    label.contains("Date")
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
