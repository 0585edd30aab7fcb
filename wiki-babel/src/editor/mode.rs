//! Editor modes and where the last one is remembered
//!
//! The persisted value is one of the strings `text`, `visual`, `preview`; anything else reads
//! back as source mode. Preview is never written: reopening an editor lands in an editable mode.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default key under which the last mode is stored.
pub const DEFAULT_MODE_KEY: &str = "wiki-editor-mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Plain markup in a text area
    #[default]
    #[serde(rename = "text")]
    Source,
    /// The rich-text widget
    #[serde(rename = "visual")]
    RichText,
    /// Rendered HTML, read-only
    #[serde(rename = "preview")]
    Preview,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Source => "text",
            Mode::RichText => "visual",
            Mode::Preview => "preview",
        }
    }

    /// Unknown names fall back to [`Mode::Source`].
    pub fn from_name(name: &str) -> Mode {
        match name {
            "visual" => Mode::RichText,
            "preview" => Mode::Preview,
            _ => Mode::Source,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remembers the last used mode between editor sessions.
pub trait ModeStore {
    fn get(&self) -> Mode;
    fn set(&mut self, mode: Mode);
}

/// Store used when nothing persistent is available: always source, writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct VolatileModeStore;

impl ModeStore for VolatileModeStore {
    fn get(&self) -> Mode {
        Mode::Source
    }

    fn set(&mut self, _mode: Mode) {}
}

/// String key/value storage supplied by the host (browser local storage and the like).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// A [`ModeStore`] keeping the mode name under a fixed key of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct KeyedModeStore<S> {
    store: S,
    key: String,
    fallback: Mode,
}

impl<S: KeyValueStore> KeyedModeStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        KeyedModeStore {
            store,
            key: key.into(),
            fallback: Mode::Source,
        }
    }

    /// Mode reported while nothing is stored under the key.
    pub fn with_default(mut self, mode: Mode) -> Self {
        self.fallback = mode;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> ModeStore for KeyedModeStore<S> {
    fn get(&self) -> Mode {
        self.store
            .get_item(&self.key)
            .map(|name| Mode::from_name(&name))
            .unwrap_or(self.fallback)
    }

    fn set(&mut self, mode: Mode) {
        if mode == Mode::Preview {
            return;
        }
        self.store.set_item(&self.key, mode.as_str());
    }
}
