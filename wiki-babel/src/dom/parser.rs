//! HTML → Document Tree
//!
//! Rendered HTML coming back from the renderer is loaded into a fresh [`Document`]. We rely on
//! `html5ever` for the actual parsing (same tokenizer and tree builder rules as a browser) and
//! on `markup5ever_rcdom` as the intermediate DOM, then copy the body into our owned tree.
//!
//! Comments, doctypes and processing instructions are dropped. Note that, as in a browser, a
//! newline directly after `<pre>` is not part of the content.

use super::{Document, Element, Node};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML document or fragment; the body's children become the document.
pub fn parse_html(html: &str) -> Document {
    Document::new(parse_fragment(html))
}

/// Parse an HTML fragment into a list of nodes.
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    find_element(&dom.document, "body")
        .map(|body| convert_children(&body))
        .unwrap_or_default()
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if &*name.local == tag {
                return Some(child.clone());
            }
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::new();
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                // rcdom merges text already, but children of dropped nodes can abut
                if let Some(Node::Text(previous)) = nodes.last_mut() {
                    previous.push_str(&text);
                } else {
                    nodes.push(Node::Text(text));
                }
            }
            NodeData::Element { name, attrs, .. } => {
                let mut element = Element::new(&*name.local);
                for attr in attrs.borrow().iter() {
                    element.set_attr(&attr.name.local, &attr.value);
                }
                element.children = convert_children(child);
                nodes.push(Node::Element(element));
            }
            NodeData::Document
            | NodeData::Doctype { .. }
            | NodeData::Comment { .. }
            | NodeData::ProcessingInstruction { .. } => {}
        }
    }
    nodes
}
