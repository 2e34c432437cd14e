use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("BOLD_SPAN is a valid regex pattern"));

static NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n").expect("NEWLINE is a valid regex pattern"));

static LINE_START_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|<br>)(\* )").expect("LINE_START_BULLET is a valid regex pattern")
});

/// Converts the model's lightweight markup into HTML for direct display.
///
/// Rules run in order: `*phrase*` becomes `<b>phrase</b>`, newlines become
/// `<br>`, then bullets (`* `) starting a line get an extra `<br>` in front.
pub fn format(text: &str) -> String {
    let bolded = BOLD_SPAN.replace_all(text, "<b>${1}</b>");
    let broken = NEWLINE.replace_all(&bolded, "<br>");
    LINE_START_BULLET
        .replace_all(&broken, "${1}<br>${2}")
        .into_owned()
}
