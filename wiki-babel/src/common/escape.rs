//! Escape rules shared by both dialects
//!
//!     The host renderer expands macros (`{{toc}}`), wiki links (`[[Page]]`), prefixed
//!     references (`source:foo`) and issue/revision shapes (`#12`, `r34`). None of that may leak
//!     into the rich-text view, so before transmission every trigger shape gets a `$` marker
//!     inserted where the renderer's pattern would otherwise match, and after rendering every
//!     `$x` pair collapses back to `x`. A literal `$` in the input is doubled first, which keeps
//!     the pair reversible.
//!
//!     Dialect-specific rules run between [`mark_literal_markers`] and [`defuse_references`];
//!     see `formats::textile::escape` and `formats::markdown::escape`.

use once_cell::sync::Lazy;
use regex::Regex;

/// The character inserted to break renderer patterns.
pub const MARKER: char = '$';

/// Keywords the renderer turns into links when followed by a colon.
pub const REFERENCE_PREFIXES: &[&str] = &[
    "attachment",
    "commit",
    "document",
    "export",
    "forum",
    "message",
    "news",
    "project",
    "sandbox",
    "source",
    "user",
    "version",
];

static PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("({}):", REFERENCE_PREFIXES.join("|"))).expect("valid regex")
});
static ISSUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([1-9][0-9]*((#note)?-[1-9][0-9]*)?(\s|$))").expect("valid regex"));
static REVISION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"r([1-9][0-9]*(\s|$))").expect("valid regex"));
static MARKED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(.)").expect("valid regex"));
static LEGEND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<legend>.*?</legend>").expect("valid regex"));
static ANCHOR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<a name=.+?></a>").expect("valid regex"));
static FRAGMENT_ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"<a href="#[^"]*"[^>]*>.*?</a>"##).expect("valid regex"));

/// Double every literal marker so that [`strip_markers`] restores it.
pub fn mark_literal_markers(text: &str) -> String {
    text.replace(MARKER, "$$")
}

/// Defuse macro openers, reference prefixes, and issue/revision shapes.
pub fn defuse_references(text: &str) -> String {
    let text = text.replace("{{", "{${").replace("[[", "[$[");
    let text = PREFIX_RE.replace_all(&text, "$1$$:");
    let text = ISSUE_RE.replace_all(&text, "#$$$1");
    REVISION_RE.replace_all(&text, "r$$$1").into_owned()
}

/// Collapse each `$x` pair to `x`.
pub fn strip_markers(html: &str) -> String {
    MARKED_RE.replace_all(html, "$1").into_owned()
}

/// Remove renderer scaffolding: legends, named anchors, and same-page fragment links.
pub fn strip_renderer_artifacts(html: &str) -> String {
    let html = LEGEND_RE.replace_all(html, "");
    let html = ANCHOR_NAME_RE.replace_all(&html, "");
    FRAGMENT_ANCHOR_RE.replace_all(&html, "").into_owned()
}

/// Shared tail of both dialects' unescape.
pub fn unescape_common(html: &str) -> String {
    strip_renderer_artifacts(&strip_markers(html))
}
