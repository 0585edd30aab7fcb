//! Functional one-shot helpers
//!
//! Thin wrappers around the registry for callers that deal in strings (the CLI, scripts). Each
//! looks the dialect up by name and reports errors as strings.

use crate::common::links::AttachmentSet;
use crate::common::rules::ConvertContext;
use crate::common::style_filter;
use crate::dom::{parse_html, Document};
use crate::registry::FormatRegistry;
use crate::render::{AttachmentParam, RenderRequest, Renderer};

/// Convert an HTML fragment to wiki markup.
///
/// # Example
///
/// ```
/// use wiki_babel::common::links::AttachmentSet;
/// use wiki_babel::transforms::html_to_markup;
///
/// let markup = html_to_markup("<p><em>hi</em></p>", "markdown", &AttachmentSet::default()).unwrap();
/// assert_eq!(markup, "_hi_");
/// ```
pub fn html_to_markup(html: &str, format: &str, attachments: &AttachmentSet) -> Result<String, String> {
    let registry = FormatRegistry::default();
    let format = registry.get(format).map_err(|e| e.to_string())?;
    format
        .serialize(&parse_html(html), &ConvertContext::new(attachments))
        .map_err(|e| e.to_string())
}

/// Escape markup for the host renderer.
pub fn escape_markup(source: &str, format: &str) -> Result<String, String> {
    let registry = FormatRegistry::default();
    let format = registry.get(format).map_err(|e| e.to_string())?;
    Ok(format.escape(source))
}

/// Clean rendered HTML for loading into the rich-text view.
pub fn unescape_html(html: &str, format: &str) -> Result<String, String> {
    let registry = FormatRegistry::default();
    let format = registry.get(format).map_err(|e| e.to_string())?;
    Ok(format.unescape(html))
}

/// Whitelist an inline style declaration.
pub fn filter_style(raw: &str) -> String {
    style_filter::filter(raw)
}

/// Escape, render, unescape, and parse: the path markup takes into the rich-text view.
pub fn markup_to_document<R: Renderer>(
    source: &str,
    format: &str,
    renderer: &R,
    attachments: Vec<AttachmentParam>,
) -> Result<Document, String> {
    let registry = FormatRegistry::default();
    let format = registry.get(format).map_err(|e| e.to_string())?;
    let request = RenderRequest::new(&format.escape(source), attachments);
    let html = renderer.render(&request).map_err(|e| e.to_string())?;
    Ok(parse_html(&format.unescape(&html)))
}
