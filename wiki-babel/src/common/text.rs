//! Text helpers shared by the rule tables.

use once_cell::sync::Lazy;
use regex::Regex;

static THREE_OR_MORE_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n\n+").expect("valid regex"));
static TWO_OR_MORE_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").expect("valid regex"));

/// Collapse runs of two or more blank lines into a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    THREE_OR_MORE_NEWLINES.replace_all(text, "\n\n").into_owned()
}

/// Remove blank lines entirely: any run of newlines becomes one.
pub fn remove_blank_lines(text: &str) -> String {
    TWO_OR_MORE_NEWLINES.replace_all(text, "\n").into_owned()
}

/// Prefix every line, empty ones included.
pub fn prefix_lines(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote block: trimmed, blank runs collapsed, every line prefixed with `> `.
pub fn quote_block(content: &str) -> String {
    prefix_lines(&collapse_blank_lines(content.trim()), "> ")
}

pub fn trim_leading_newlines(text: &str) -> &str {
    text.trim_start_matches('\n')
}

pub fn trim_trailing_newlines(text: &str) -> &str {
    text.trim_end_matches('\n')
}

/// Ensure `text` ends with exactly one newline.
pub fn with_single_trailing_newline(text: &str) -> String {
    format!("{}\n", trim_trailing_newlines(text))
}

/// Join two adjacent replacements. Newlines at the seam are replaced by the larger of the two
/// counts, never more than two.
pub fn join(output: &str, replacement: &str) -> String {
    let left = trim_trailing_newlines(output);
    let right = trim_leading_newlines(replacement);
    let newlines = (output.len() - left.len())
        .max(replacement.len() - right.len())
        .min(2);
    let mut joined = String::with_capacity(left.len() + newlines + right.len());
    joined.push_str(left);
    joined.push_str(&"\n".repeat(newlines));
    joined.push_str(right);
    joined
}

/// Append a line break's replacement. Consecutive breaks add up, to at most one blank line.
pub fn append_line_break(output: &str, replacement: &str) -> String {
    let joined = format!("{output}{replacement}");
    let body = trim_trailing_newlines(&joined);
    let newlines = (joined.len() - body.len()).min(2);
    format!("{body}{}", "\n".repeat(newlines))
}

/// Final clean-up: leading tabs/newlines and all trailing whitespace go.
pub fn post_process(output: &str) -> String {
    output
        .trim_start_matches(['\t', '\r', '\n'])
        .trim_end()
        .to_string()
}
