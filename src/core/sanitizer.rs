use regex::Regex;
use std::sync::LazyLock;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").expect("markup tag pattern is valid"));

const ALLOWED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '\'', '"', '%', '-'];

fn is_allowed(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

/// Make a value safe to draw on a contract.
///
/// Markup tags (`<b>`, `</p>`, `<br/>`) are dropped whole, then every word loses the characters that
/// are not letters, digits or common punctuation. Words that end up empty are
/// discarded and the rest are joined with single spaces, which makes the
/// function idempotent.
pub fn sanitize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let without_tags = MARKUP_TAG.replace_all(text, " ");

    without_tags
        .split_whitespace()
        .map(|word| word.chars().filter(|c| is_allowed(*c)).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
