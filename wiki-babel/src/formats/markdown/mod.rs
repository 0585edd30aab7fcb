//! Markdown format implementation
//!
//! Serialization targets the CommonMark + GFM dialect the host wiki renders. The mapping:
//!
//! | Rich text                         | Markdown                         |
//! |-----------------------------------|----------------------------------|
//! | `<h1>`..`<h6>`                    | `#` .. `######` (ATX)            |
//! | `<em>`/`<i>`, `<strong>`/`<b>`    | `_em_`, `**strong**`             |
//! | `<del>`, line-through span        | `~~text~~`                       |
//! | underline span                    | `<ins>text</ins>`                |
//! | `<ins>`, `<sup>`, `<sub>`         | kept as HTML                     |
//! | styled `<p>`, `<div>`, `<span>`   | kept as HTML with `style`        |
//! | `<pre>`                           | `~~~ lang` fence                 |
//! | `<img>`                           | `![alt](url)`                    |
//! | `<table>`                         | GFM pipe table                   |
//! | `<br>`                            | newline (no hard-break spaces)   |
//!
//! Markdown special characters in text are not escaped; the renderer is expected to keep
//! literal text as typed.
//!
//! # Library Choice
//!
//! Serialization runs on the shared rule engine. `comrak` backs [`preview::CommonMarkRenderer`],
//! a local stand-in for the host renderer.

pub mod escape;
pub mod preview;
pub mod serializer;
pub mod tables;

use crate::common::rules::ConvertContext;
use crate::dom::Document;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with GFM tables"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn serialize(&self, doc: &Document, context: &ConvertContext<'_>) -> Result<String, FormatError> {
        serializer::serialize_to_markdown(doc, context)
    }

    fn escape(&self, source: &str) -> String {
        escape::escape(source)
    }

    fn unescape(&self, html: &str) -> String {
        escape::unescape(html)
    }

    fn image_markup(&self, path: &str) -> String {
        format!("![]({path})")
    }
}
