//! Rich text ↔ wiki markup for a wiki's editing surface
//!
//!     This crate turns the document tree of a rich-text editor into Textile or Markdown, and
//!     prepares markup for the trip through the wiki's own renderer so it can be loaded back into
//!     the editor. Parsing markup is not done here: the host renderer owns that, and this crate
//!     only shields it from macro and reference expansion on the way in and strips its
//!     scaffolding on the way out.
//!
//!     This is a pure lib: no code supposes a shell environment (no printing, no env vars).
//!     Collaborators (the editing widget, the renderer, the upload mechanism, the persisted mode
//!     store) are traits the host implements.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── render.rs               # Renderer capability
//!     ├── transforms.rs           # One-shot string helpers
//!     ├── dom                     # Document tree, HTML loading, whitespace, cursor
//!     ├── common                  # Rule engine, style filter, adjacency guard, links, escape
//!     ├── formats
//!     │   ├── textile
//!     │   └── markdown            # + GFM tables, local comrak renderer
//!     └── editor                  # Mode coordinator and its collaborators
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common                  # Mock widget, echo renderer, uploader, clock
//!     ├── textile
//!     ├── markdown
//!     ├── escape
//!     └── editor
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.
//!
//! Core Algorithm
//!
//!     Serialization is a post-order walk where each element is replaced by the first matching
//!     rule of an ordered table (see ./common/rules.rs). The dialects are just tables: overrides
//!     for what the wiki needs, then the dialect's plain vocabulary. Whitespace is collapsed up
//!     front the way a browser would, and sibling outputs are joined with at most one blank line.
//!
//! Round Trip
//!
//!     source ──escape──▶ renderer ──unescape──▶ tree ──serialize──▶ source
//!
//!     `unescape(render(escape(s)))` must show what the author typed, with no macro or link
//!     expanded and no marker left visible. The renderer is out of our hands, so the escape rules
//!     are written against its trigger shapes (see ./common/escape.rs).
pub mod common;
pub mod dom;
pub mod editor;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod render;
pub mod transforms;

pub use common::links::AttachmentSet;
pub use common::rules::ConvertContext;
pub use dom::{parse_html, Document, Element, Node};
pub use editor::{EditorError, Mode, ModeCoordinator};
pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;
pub use render::{RenderError, RenderRequest, Renderer};
