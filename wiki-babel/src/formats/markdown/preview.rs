//! Local CommonMark renderer
//!
//! A [`Renderer`] backed by `comrak`, for previews without a host wiki (the CLI's `preview`
//! command) and for round-trip tests. It renders the request text as GFM with raw HTML
//! allowed, since the serializer writes styled spans and blocks as inline HTML.

use crate::render::{RenderError, RenderRequest, Renderer};
use comrak::{markdown_to_html, ComrakOptions};

#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMarkRenderer;

impl CommonMarkRenderer {
    pub fn new() -> Self {
        CommonMarkRenderer
    }

    /// Render markup directly, without a request envelope.
    pub fn render_markup(&self, markup: &str) -> String {
        markdown_to_html(markup, &default_comrak_options())
    }
}

impl Renderer for CommonMarkRenderer {
    fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
        Ok(self.render_markup(&request.text))
    }
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    // Styled spans and divs are emitted as raw HTML
    options.render.unsafe_ = true;
    options
}
