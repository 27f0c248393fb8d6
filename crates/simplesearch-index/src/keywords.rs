//! Keyword normalization.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Characters that always split words.
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\$!?|`.,;:()<>{}#*@/="\[\]]"#).expect("valid separator regex")
});

/// Hyphens, pluses, underscores and apostrophes opening a word.
static LEADING_SOFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" [-+_']+").expect("valid leading soft regex"));

/// Hyphens, pluses, underscores and apostrophes closing a word.
static TRAILING_SOFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+_']+ ").expect("valid trailing soft regex"));

/// Convert free text into a keyword string.
///
/// The result is a space separated list of unique lowercase words sorted by
/// code point. Words made only of punctuation are dropped, so text without
/// letters or digits produces an empty string.
///
/// ```
/// use simplesearch_index::make_keywords;
///
/// assert_eq!(
///     make_keywords("\"Eat, drink, and be anonymous.\" --John Doe"),
///     "and anonymous be doe drink eat john"
/// );
/// ```
pub fn make_keywords(text: &str) -> String {
    // Pad so every word is surrounded by spaces.
    let padded = format!(" {text} ");
    let collapsed = WHITESPACE.replace_all(&padded, " ");
    let separated = SEPARATORS.replace_all(&collapsed, " ");

    // Soft characters only go at word edges; `pro-life` keeps its hyphen.
    let trimmed = LEADING_SOFT.replace_all(&separated, " ");
    let trimmed = TRAILING_SOFT.replace_all(&trimmed, " ");
    let lowered = trimmed.to_lowercase();

    let words: BTreeSet<&str> = lowered
        .split(' ')
        .filter(|word| !word.is_empty())
        .collect();

    words
        .into_iter()
        .filter(|word| word.bytes().any(|b| b.is_ascii_alphanumeric()))
        .collect::<Vec<_>>()
        .join(" ")
}
