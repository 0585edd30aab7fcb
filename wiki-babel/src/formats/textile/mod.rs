//! Textile format implementation
//!
//! Serialization targets the Textile dialect understood by the host wiki (RedCloth flavour):
//!
//! | Rich text                        | Textile                              |
//! |----------------------------------|--------------------------------------|
//! | `<strong>`, `<em>`               | `*b*`, `_i_` (with `{style}`)        |
//! | `<b>`, `<i>`, `<cite>`           | `**b**`, `__i__`, `??c??`            |
//! | underline / line-through span    | `+u+`, `-s-`                         |
//! | any other `<span>`               | `%{style}text%`                      |
//! | `<img>`                          | `!{style}url(alt)!`                  |
//! | `<a><img></a>`                   | `!url!:href`                         |
//! | `<a href>`                       | `"text(title)":href`                 |
//! | `<pre><code class>`              | kept as HTML                         |
//! | `<table>`                        | `\|_. head \|` rows with attributes  |
//!
//! Inline markers that touch other content get a `<notextile></notextile>` boundary (see
//! [`crate::common::adjacency`]). Literal text is never escaped: the renderer is expected to
//! treat it faithfully, and `1. ` at the start of a line stays as typed.

pub mod escape;
pub mod serializer;

use crate::common::rules::ConvertContext;
use crate::dom::Document;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for Textile
pub struct TextileFormat;

impl Format for TextileFormat {
    fn name(&self) -> &str {
        "textile"
    }

    fn description(&self) -> &str {
        "Textile wiki markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["textile"]
    }

    fn serialize(&self, doc: &Document, context: &ConvertContext<'_>) -> Result<String, FormatError> {
        serializer::serialize_to_textile(doc, context)
    }

    fn escape(&self, source: &str) -> String {
        escape::escape(source)
    }

    fn unescape(&self, html: &str) -> String {
        escape::unescape(html)
    }

    fn image_markup(&self, path: &str) -> String {
        format!("!{path}!")
    }
}
