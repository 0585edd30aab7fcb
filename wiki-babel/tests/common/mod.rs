//! Shared test doubles: an in-memory editing widget, renderers, an uploader and a clock.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use wiki_babel::common::links::AttachmentSet;
use wiki_babel::common::rules::ConvertContext;
use wiki_babel::dom::{parse_fragment, parse_html, Document};
use wiki_babel::editor::{
    AttachmentUploader, Clock, EditorWidget, ImageMenuEntry, PastedImage, Timestamp,
};
use wiki_babel::format::Format;
use wiki_babel::formats::{MarkdownFormat, TextileFormat};
use wiki_babel::render::{RenderError, RenderRequest, Renderer};

pub fn textile(html: &str) -> String {
    textile_with(html, &AttachmentSet::default())
}

pub fn textile_with(html: &str, attachments: &AttachmentSet) -> String {
    TextileFormat
        .serialize(&parse_html(html), &ConvertContext::new(attachments))
        .expect("textile serialization")
}

pub fn markdown(html: &str) -> String {
    markdown_with(html, &AttachmentSet::default())
}

pub fn markdown_with(html: &str, attachments: &AttachmentSet) -> String {
    MarkdownFormat
        .serialize(&parse_html(html), &ConvertContext::new(attachments))
        .expect("markdown serialization")
}

/// Widget holding a tree; inserted fragments go to the end (the caret).
#[derive(Debug, Default)]
pub struct MockWidget {
    pub doc: Document,
    pub inserted: Vec<String>,
    pub menu: Vec<ImageMenuEntry>,
    pub loads: usize,
}

impl MockWidget {
    pub fn with_html(html: &str) -> Self {
        MockWidget {
            doc: parse_html(html),
            ..Default::default()
        }
    }
}

impl EditorWidget for MockWidget {
    fn document(&self) -> Document {
        self.doc.clone()
    }

    fn load(&mut self, doc: Document) {
        self.doc = doc;
        self.loads += 1;
    }

    fn insert_html(&mut self, fragment: &str) {
        self.inserted.push(fragment.to_string());
        self.doc.root.children.extend(parse_fragment(fragment));
    }

    fn set_image_menu(&mut self, entries: &[ImageMenuEntry]) {
        self.menu = entries.to_vec();
    }
}

/// Renderer that returns its input text verbatim, recording each request.
#[derive(Debug, Default)]
pub struct EchoRenderer {
    pub requests: RefCell<Vec<RenderRequest>>,
}

impl Renderer for EchoRenderer {
    fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(request.text.clone())
    }
}

/// Renderer that wraps the text in a paragraph.
pub struct ParagraphRenderer;

impl Renderer for ParagraphRenderer {
    fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
        Ok(format!("<p>{}</p>", request.text.trim_end()))
    }
}

pub struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&self, _request: &RenderRequest) -> Result<String, RenderError> {
        Err(RenderError::Transport("connection refused".to_string()))
    }
}

/// Uploader sharing what it received with the test.
#[derive(Clone)]
pub struct RecordingUploader {
    pub accept: bool,
    pub uploaded: Rc<RefCell<Vec<PastedImage>>>,
}

impl RecordingUploader {
    pub fn new(accept: bool) -> Self {
        RecordingUploader {
            accept,
            uploaded: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl AttachmentUploader for RecordingUploader {
    fn upload(&mut self, image: &PastedImage) -> bool {
        self.uploaded.borrow_mut().push(image.clone());
        self.accept
    }
}

pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(Timestamp {
        year: 2019,
        month: 1,
        day: 2,
        hour: 3,
        minute: 4,
        second: 5,
        millisecond: 6,
    })
}
