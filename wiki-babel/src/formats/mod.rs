//! Format implementations
//!
//! The two wiki dialects. Each converts a rich-text tree to its markup and knows how to escape
//! that markup for the host renderer.

pub mod markdown;
pub mod textile;

pub use markdown::MarkdownFormat;
pub use textile::TextileFormat;

use crate::error::FormatError;
use crate::format::Format;

/// Owned instance of a built-in dialect.
pub fn by_name(name: &str) -> Result<Box<dyn Format>, FormatError> {
    match name {
        "textile" => Ok(Box::new(TextileFormat)),
        "markdown" => Ok(Box::new(MarkdownFormat)),
        other => Err(FormatError::FormatNotFound(other.to_string())),
    }
}
