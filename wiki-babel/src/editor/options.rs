//! Editor settings supplied by the host.

use super::language::normalize_language;
use super::mode::{KeyValueStore, KeyedModeStore, Mode, DEFAULT_MODE_KEY};
use crate::common::links::{AttachmentSet, DEFAULT_IMAGE_EXTENSIONS};

#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Dialect name, `textile` or `markdown`
    pub format: String,
    /// Widget translation, already normalized
    pub language: String,
    /// Extensions offered in the image menu (case-insensitive)
    pub image_extensions: Vec<String>,
    pub attachments: AttachmentSet,
    /// Key of the persisted last mode
    pub mode_key: String,
    /// Mode entered when nothing is persisted yet
    pub default_mode: Mode,
}

impl Default for EditorOptions {
    fn default() -> Self {
        EditorOptions {
            format: "textile".to_string(),
            language: "en".to_string(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            attachments: AttachmentSet::default(),
            mode_key: DEFAULT_MODE_KEY.to_string(),
            default_mode: Mode::Source,
        }
    }
}

impl EditorOptions {
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Set the widget language from a locale tag such as `pt-br`.
    pub fn with_language(mut self, tag: &str) -> Self {
        self.language = normalize_language(tag);
        self
    }

    pub fn with_attachments(mut self, attachments: AttachmentSet) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_default_mode(mut self, mode: Mode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Persist the last mode in `items` under [`mode_key`](Self::mode_key).
    pub fn mode_store<S: KeyValueStore>(&self, items: S) -> KeyedModeStore<S> {
        KeyedModeStore::new(items, self.mode_key.as_str()).with_default(self.default_mode)
    }
}
