//! Shared configuration loader for the wiki-babel toolchain.
//!
//! `defaults/wiki.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`WikiConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use wiki_babel::common::links::AttachmentSet;
use wiki_babel::editor::{EditorOptions, Mode};

const DEFAULT_TOML: &str = include_str!("../defaults/wiki.default.toml");

/// Top-level configuration consumed by wiki-babel applications.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiConfig {
    pub editor: EditorSection,
    pub attachments: AttachmentsSection,
}

/// Editor behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct EditorSection {
    pub format: String,
    pub default_mode: Mode,
    pub mode_key: String,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsSection {
    pub image_extensions: Vec<String>,
    pub files: Vec<String>,
}

impl WikiConfig {
    /// Editor options for the configured dialect, language and attachments.
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            image_extensions: self.attachments.image_extensions.clone(),
            attachments: self.attachment_set(),
            mode_key: self.editor.mode_key.clone(),
            default_mode: self.editor.default_mode,
            ..EditorOptions::default()
        }
        .with_format(self.editor.format.as_str())
        .with_language(&self.editor.language)
    }

    pub fn attachment_set(&self) -> AttachmentSet {
        AttachmentSet::from(self.attachments.files.clone())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<WikiConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<WikiConfig, ConfigError> {
    Loader::new().build()
}
