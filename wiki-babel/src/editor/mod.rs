//! Editor integration
//!
//! The [`ModeCoordinator`] and the collaborators it talks to: the editing widget
//! ([`EditorWidget`]), the persisted mode ([`ModeStore`]), the clipboard ([`Clipboard`]) and the
//! attachment upload ([`AttachmentUploader`]). The host implements these traits; the renderer
//! is [`crate::render::Renderer`].

pub mod coordinator;
pub mod language;
pub mod mode;
pub mod options;
pub mod paste;
pub mod widget;

pub use coordinator::{ModeCoordinator, PendingRender};
pub use language::normalize_language;
pub use mode::{KeyValueStore, KeyedModeStore, MemoryKeyValueStore, Mode, ModeStore, VolatileModeStore};
pub use options::EditorOptions;
pub use paste::{
    AttachmentUploader, Clipboard, ClipboardItem, Clock, LegacyClipboard, PasteKind, PasteOutcome,
    PastedImage, StandardClipboard, SystemClock, Timestamp,
};
pub use widget::{EditorWidget, ImageMenuEntry};

use crate::error::FormatError;
use crate::render::RenderError;
use std::fmt;

/// Errors reported by the [`ModeCoordinator`]
#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// No widget attached yet
    Uninitialized,
    /// The renderer failed; the view was left as it was
    Render(RenderError),
    /// Serialization failed or the dialect is unknown
    Format(FormatError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::Uninitialized => write!(f, "Editor is not initialized"),
            EditorError::Render(err) => write!(f, "{err}"),
            EditorError::Format(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditorError::Uninitialized => None,
            EditorError::Render(err) => Some(err),
            EditorError::Format(err) => Some(err),
        }
    }
}

impl From<FormatError> for EditorError {
    fn from(err: FormatError) -> Self {
        EditorError::Format(err)
    }
}

impl From<RenderError> for EditorError {
    fn from(err: RenderError) -> Self {
        EditorError::Render(err)
    }
}
