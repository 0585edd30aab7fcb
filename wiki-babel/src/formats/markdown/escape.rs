//! Markdown escaping around the host renderer
//!
//! Besides the shared rules, fenced code blocks get their language moved inside the block as
//! `lang+-*/!?` on the first line. The renderer then treats the block as plain code (no
//! highlighting, no language-specific mangling), and [`unescape`] turns the marker back into a
//! `data-code` attribute that the `pre` serializer rule reads.

use crate::common::escape::{defuse_references, mark_literal_markers, unescape_common};
use once_cell::sync::Lazy;
use regex::Regex;

/// Sequence appended to the language name inside the fenced block.
pub const FENCE_LANGUAGE_MARKER: &str = "+-*/!?";

static TILDE_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^~~~ *(\w+)([\s\S]+?)~~~$").expect("valid regex"));
static BACKTICK_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^``` *(\w+)([\s\S]+?)```$").expect("valid regex"));
static MARKED_PRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<pre>(?:<code[^>]*>)?(\w+)\+-\*/!\?\n?([\s\S]*?)(?:</code>)?</pre>")
        .expect("valid regex")
});

/// Defuse Markdown source before sending it to the renderer.
pub fn escape(source: &str) -> String {
    let text = mark_literal_markers(source);
    let replacement = format!("~~~\n${{1}}{FENCE_LANGUAGE_MARKER}${{2}}~~~");
    let text = TILDE_FENCE_RE.replace_all(&text, replacement.as_str());
    let text = BACKTICK_FENCE_RE.replace_all(&text, replacement.as_str());
    defuse_references(&text)
}

/// Recover fenced-code languages, then apply the shared clean-up.
pub fn unescape(html: &str) -> String {
    let html = MARKED_PRE_RE.replace_all(html, r#"<pre><code data-code="$1">$2</code></pre>"#);
    unescape_common(&html)
}
