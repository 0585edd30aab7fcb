//! Textile escaping around the host renderer

use crate::common::escape::{defuse_references, mark_literal_markers, unescape_common};
use once_cell::sync::Lazy;
use regex::Regex;

static CHARACTER_REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#([1-9][0-9]*);").expect("valid regex"));
static CODE_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<code>\n?").expect("valid regex"));
static CODE_CLASS_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<code\s+class="(\w+)">\n?"#).expect("valid regex"));
static FOOTNOTE_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").expect("valid regex"));
static FOOTNOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^fn(\d+)\.\s").expect("valid regex"));

/// Defuse Textile source before sending it to the renderer.
pub fn escape(source: &str) -> String {
    let text = mark_literal_markers(source);
    let text = CHARACTER_REFERENCE_RE.replace_all(&text, "&$$#$1;");
    let text = CODE_OPEN_RE.replace_all(&text, "<code>");
    let text = CODE_CLASS_OPEN_RE.replace_all(&text, r#"<code class="$$$1">"#);
    let text = text
        .replace("<notextile>", "<$notextile><notextile>")
        .replace("</notextile>", "</notextile></$notextile>");
    let text = FOOTNOTE_REF_RE.replace_all(&text, "[$$$1]");
    let text = FOOTNOTE_RE.replace_all(&text, "fn$$$1. ");
    defuse_references(&text)
}

/// Textile output needs only the shared clean-up.
pub fn unescape(html: &str) -> String {
    unescape_common(html)
}
