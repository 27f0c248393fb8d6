//! Markup removal for indexed text.
//!
//! Both functions are best-effort: malformed input never fails, whatever
//! cannot be recognized as markup is kept as text.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

/// A whole line of the form `[label]: target`.
static LINK_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\[[^\]]*\]:.*$").expect("valid link definition regex"));

/// `[text]`, `[text](target)` or `[text][ref]`.
static LINK_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\](\[[^\]]*\]|\([^)]*\))?").expect("valid link reference regex")
});

/// Remove HTML tags and decode character entities.
///
/// Every tag, comment or declaration is replaced by a space so words in
/// neighbouring elements stay apart. Entities are decoded afterwards, runs of
/// whitespace collapse to one space and the result is trimmed.
pub fn strip_html(html: &str) -> String {
    let text = remove_tags(html);
    let text = decode_html_entities(&text);
    collapse_whitespace(&text)
}

/// Remove link markup from Markdown text.
///
/// Link definition lines are dropped entirely, then every link reference is
/// replaced by its text. Other Markdown syntax is left alone.
pub fn strip_markdown(markdown: &str) -> String {
    // Definitions first: the bracket rule would otherwise turn
    // `[label]: target` into `label: target`.
    let without_definitions = LINK_DEFINITION.replace_all(markdown, "");
    LINK_REFERENCE
        .replace_all(&without_definitions, "${1}")
        .into_owned()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TagState {
    Text,
    Tag { quote: Option<char> },
    Comment { body_start: usize },
}

/// Replace tags with spaces.
///
/// A `<` only opens a tag when followed by a letter, `/`, `!` or `?`, so text
/// like `a < b` survives. An unterminated tag swallows the rest of the input.
fn remove_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut state = TagState::Text;
    let mut chars = html.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match state {
            TagState::Text => {
                let opens_tag = c == '<'
                    && chars.peek().is_some_and(|&(_, next)| {
                        next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')
                    });

                if !opens_tag {
                    result.push(c);
                } else if html[idx..].starts_with("<!--") {
                    state = TagState::Comment {
                        body_start: idx + "<!--".len(),
                    };
                    chars.nth(2);
                } else {
                    state = TagState::Tag { quote: None };
                }
            }
            TagState::Tag { quote: Some(q) } => {
                if c == q {
                    state = TagState::Tag { quote: None };
                }
            }
            TagState::Tag { quote: None } => match c {
                '"' | '\'' => state = TagState::Tag { quote: Some(c) },
                '>' => {
                    result.push(' ');
                    state = TagState::Text;
                }
                _ => {}
            },
            TagState::Comment { body_start } => {
                if c == '>' && idx >= body_start && html[body_start..idx].ends_with("--") {
                    result.push(' ');
                    state = TagState::Text;
                }
            }
        }
    }

    result
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
