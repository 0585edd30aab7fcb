//! Document Tree
//!
//!     The rich-text surface hands us its content as a tree of elements and text. The tree is
//!     owned by the editing widget; this crate reads it when serializing to markup and builds a
//!     fresh one when markup comes back from the renderer as HTML (see [`parser`]).
//!
//!     Every [`Element`] owns its children. Inline `style` attributes are parsed once, at
//!     construction, into an ordered [`Style`] so rules can ask for `text-decoration` or
//!     `text-align` without re-parsing.
//!
//!     Rules never walk the tree directly: they get a [`NodeRef`] which also knows the parent
//!     chain and the sibling list, which the Textile adjacency guard and the table rules need.

pub mod cursor;
pub mod parser;
pub mod style;
pub mod whitespace;

pub use cursor::NodeRef;
pub use parser::{parse_fragment, parse_html};
pub use style::Style;

use serde::Serialize;

/// Elements rendered as blocks (they get blank-line separation by default).
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "audio",
    "blockquote",
    "body",
    "canvas",
    "center",
    "dd",
    "dir",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "frameset",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "html",
    "isindex",
    "li",
    "main",
    "menu",
    "nav",
    "noframes",
    "noscript",
    "ol",
    "output",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Elements that never have content.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements kept even when they carry no text.
pub const MEANINGFUL_WHEN_BLANK: &[&str] = &[
    "a", "table", "thead", "tbody", "tfoot", "th", "td", "iframe", "script", "audio", "video",
];

pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag)
}

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// A rich-text document: the children of the editing surface's body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        let mut root = Element::new("body");
        root.children = children;
        Document { root }
    }

    pub fn children(&self) -> &[Node] {
        &self.root.children
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    pub fn text_content(&self) -> String {
        self.root.text_content()
    }
}

/// A node of the tree: either an element or a run of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Tag name for elements, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag.as_str())
    }

    pub fn is_element(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.text_content(),
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element with its attributes, parsed inline style and owned children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Style::is_empty")]
    pub style: Style,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Default for Element {
    fn default() -> Self {
        Element::new("body")
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute. A `style` attribute is parsed into [`Element::style`].
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_style(mut self, declarations: &str) -> Self {
        self.style = Style::parse(declarations);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_child(Node::text(text))
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "style" {
            self.style = Style::parse(value);
            return;
        }
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name,
                value: value.to_string(),
            }),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Numeric attribute such as `colspan`; missing or malformed values read as 1.
    pub fn span_attr(&self, name: &str) -> u32 {
        self.attr(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(1)
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    pub fn is_block(&self) -> bool {
        is_block(&self.tag)
    }

    pub fn is_void(&self) -> bool {
        is_void(&self.tag)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// The only child, when there is exactly one.
    pub fn sole_child(&self) -> Option<&Node> {
        match self.children.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn has_descendant(&self, predicate: &dyn Fn(&Element) -> bool) -> bool {
        self.element_children()
            .any(|child| predicate(child) || child.has_descendant(predicate))
    }
}
