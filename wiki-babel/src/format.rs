//! Format trait definition
//!
//! This module defines the core Format trait that both wiki dialects implement. A format knows
//! how to serialize a rich-text [`Document`] into its markup, how to escape that markup before
//! it is sent to the host renderer, and how to clean the renderer's HTML afterwards.

use crate::common::links::AttachmentSet;
use crate::common::rules::ConvertContext;
use crate::dom::{parse_html, Document};
use crate::error::FormatError;
use std::collections::HashMap;

/// Option key carrying a comma-separated Attachment Set for [`Format::serialize_with_options`].
pub const ATTACHMENTS_OPTION: &str = "attachments";

/// Trait for wiki markup dialects
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn serialize(&self, doc: &Document, context: &ConvertContext<'_>) -> Result<String, FormatError> {
///         Ok(doc.text_content())
///     }
///
///     fn escape(&self, source: &str) -> String {
///         source.to_string()
///     }
///
///     fn unescape(&self, html: &str) -> String {
///         html.to_string()
///     }
///
///     fn image_markup(&self, path: &str) -> String {
///         path.to_string()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "textile", "markdown")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["textile"], ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Serialize a rich-text tree into markup.
    fn serialize(&self, doc: &Document, context: &ConvertContext<'_>) -> Result<String, FormatError>;

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// The only recognized option is [`ATTACHMENTS_OPTION`]; anything else is rejected.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if let Some(key) = options.keys().find(|k| k.as_str() != ATTACHMENTS_OPTION) {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support the '{key}' parameter",
                self.name()
            )));
        }
        let attachments: AttachmentSet = options
            .get(ATTACHMENTS_OPTION)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        self.serialize(doc, &ConvertContext::new(&attachments))
    }

    /// Parse an HTML string into a tree and serialize it.
    fn serialize_html(&self, html: &str, context: &ConvertContext<'_>) -> Result<String, FormatError> {
        self.serialize(&parse_html(html), context)
    }

    /// Rewrite source text so the host renderer expands none of its macros or references.
    fn escape(&self, source: &str) -> String;

    /// Strip escape markers and renderer scaffolding from rendered HTML.
    fn unescape(&self, html: &str) -> String;

    /// Inline image markup for an uploaded file.
    fn image_markup(&self, path: &str) -> String;
}
