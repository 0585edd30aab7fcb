//! Renderer capability
//!
//! The host wiki renders markup to HTML on its side; the library only needs "submit text plus
//! attachment parameters, receive HTML". Transport lives with the caller.

use std::fmt;

/// One host-defined form parameter describing an attachment (e.g. `attachments[1][token]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentParam {
    pub name: String,
    pub value: String,
}

impl AttachmentParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        AttachmentParam {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// What gets sent to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Markup text. One trailing space is always appended so that a reference shape at the very
    /// end of the input (`#12`, `r3`) is followed by whitespace like anywhere else.
    pub text: String,
    pub attachments: Vec<AttachmentParam>,
}

impl RenderRequest {
    pub fn new(markup: &str, attachments: Vec<AttachmentParam>) -> Self {
        RenderRequest {
            text: format!("{markup} "),
            attachments,
        }
    }
}

/// Errors a renderer can report
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The request never reached the renderer or no response came back
    Transport(String),
    /// The renderer answered with an error
    Rejected(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Transport(msg) => write!(f, "Renderer unreachable: {msg}"),
            RenderError::Rejected(msg) => write!(f, "Renderer rejected the request: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Turns markup into HTML.
pub trait Renderer {
    fn render(&self, request: &RenderRequest) -> Result<String, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
        (**self).render(request)
    }
}
