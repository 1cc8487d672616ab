use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize document whitespace: CRLF to LF, runs of spaces/tabs to a
/// single space, three or more consecutive newlines to one blank line,
/// then trim the ends.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let normalized = BLANK_RUNS.replace_all(&normalized, " ");
    let normalized = NEWLINE_RUNS.replace_all(&normalized, "\n\n");
    normalized.trim().to_string()
}
