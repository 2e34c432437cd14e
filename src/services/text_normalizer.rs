use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\s.,?!-]").expect("DISALLOWED_CHARS is a valid regex pattern")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN is a valid regex pattern"));

/// Cleans extracted or user-supplied text before it is embedded in a prompt.
///
/// Keeps word characters, whitespace and `. , ? ! -`; everything else is
/// dropped. Whitespace runs collapse to a single space and the result is trimmed.
pub fn normalize(text: &str) -> String {
    let stripped = DISALLOWED_CHARS.replace_all(text, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}
