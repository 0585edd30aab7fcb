//! Style Filter
//!
//! The server-side Textile renderer only accepts a narrow CSS grammar in `{...}` style markers
//! and mis-parses anything else, so inline styles coming from the rich-text surface are
//! normalized and whitelisted before they are written out:
//!
//! 1. `rgb(r, g, b)` colors become `#rrggbb`;
//! 2. the declaration is split on `;`;
//! 3. only whitelisted properties (`color width height border background padding margin font
//!    float`, optionally with one `-suffix` such as `border-left`) with values made of
//!    percentages, `px`/`em` lengths, hex colors or bare keywords survive;
//! 4. each survivor is terminated with `;`, the list is sorted and joined with a space.
//!
//! Entries that fail the grammar are dropped silently.

use crate::dom::Style;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RGB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rgb\((\d+),\s*(\d+),\s*(\d+)\)").expect("valid rgb regex"));

static ENTRY_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*;\s*").expect("valid split regex"));

static ALLOWED_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(color|width|height|border|background|padding|margin|font|float)(-[a-z]+)?:\s*((\d+%?|\d+px|\d+(\.\d+)?em|#[0-9a-f]+|[a-z]+)\s*)+$",
    )
    .expect("valid style regex")
});

static PERCENT_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+%$").expect("valid regex"));

/// Filter a raw declaration string. Returns an empty string when nothing survives.
pub fn filter(raw: &str) -> String {
    let mut entries: Vec<String> = surviving_entries(raw)
        .map(|entry| format!("{entry};"))
        .collect();
    entries.sort();
    entries.join(" ")
}

/// Same as [`filter`], with percentage values removed first. Entries left without a value are
/// dropped.
pub fn filter_without_percentages(raw: &str) -> String {
    let mut entries: Vec<String> = surviving_entries(raw)
        .filter_map(|entry| {
            let (property, value) = entry.split_once(':')?;
            let tokens: Vec<&str> = value
                .split_whitespace()
                .filter(|token| !PERCENT_TOKEN_RE.is_match(token))
                .collect();
            (!tokens.is_empty()).then(|| format!("{}: {};", property.trim(), tokens.join(" ")))
        })
        .collect();
    entries.sort();
    entries.join(" ")
}

/// `{...}` marker for a parsed style, or an empty string if no entry survives filtering.
pub fn style_marker(style: &Style) -> String {
    wrap(filter(&style.css_text()))
}

/// Like [`style_marker`] but without percentage values.
pub fn style_marker_without_percentages(style: &Style) -> String {
    wrap(filter_without_percentages(&style.css_text()))
}

/// Rewrite `rgb(r, g, b)` as lower-case `#rrggbb`. Channels above 255 are clamped.
pub fn rgb_to_hex(text: &str) -> String {
    RGB_RE
        .replace_all(text, |caps: &Captures| {
            let hex: String = (1..=3)
                .map(|i| {
                    let channel = caps[i].parse::<u32>().unwrap_or(255).min(255);
                    format!("{channel:02x}")
                })
                .collect();
            format!("#{hex}")
        })
        .into_owned()
}

fn surviving_entries(raw: &str) -> impl Iterator<Item = String> {
    let normalized = rgb_to_hex(raw);
    ENTRY_SPLIT_RE
        .split(&normalized)
        .map(str::trim)
        .filter(|entry| ALLOWED_ENTRY_RE.is_match(entry))
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into_iter()
}

fn wrap(filtered: String) -> String {
    if filtered.is_empty() {
        filtered
    } else {
        format!("{{{filtered}}}")
    }
}
