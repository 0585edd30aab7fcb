//! The rich-text editing widget, as the coordinator sees it.

use crate::dom::Document;

/// One entry of the image insertion menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMenuEntry {
    /// Attachment filename, shown as the label and inserted as the image path
    pub file: String,
}

impl ImageMenuEntry {
    pub fn new(file: impl Into<String>) -> Self {
        ImageMenuEntry { file: file.into() }
    }
}

/// Operations the host's editing widget provides.
///
/// Events flow the other way: the host forwards focus, paste and drop events to
/// [`ModeCoordinator`](super::ModeCoordinator) methods.
pub trait EditorWidget {
    /// Current content tree.
    fn document(&self) -> Document;

    /// Replace the content wholesale.
    fn load(&mut self, doc: Document);

    /// Insert an HTML fragment at the caret.
    fn insert_html(&mut self, fragment: &str);

    /// Replace the image insertion menu. An empty menu disables the button.
    fn set_image_menu(&mut self, entries: &[ImageMenuEntry]);
}
