//! Adjacency Guard (Textile)
//!
//! Textile inline markers (`*bold*`, `_em_`, `+u+`, `-del-`, `%span%`) are only recognized at
//! word boundaries. When the emitted markup abuts other non-whitespace content, or another
//! element that is not a line break, an empty `<notextile></notextile>` pair is placed on that
//! side so the renderer sees an explicit boundary.

use crate::dom::{Node, NodeRef};

pub const NOTEXTILE: &str = "<notextile></notextile>";

/// Wrap `emitted` with the disambiguation marker on each side that needs it.
pub fn guard(node: &NodeRef<'_>, emitted: &str) -> String {
    let before = node
        .previous_sibling()
        .is_some_and(|sibling| abuts(sibling, |text| text.chars().next_back()));
    let after = node
        .next_sibling()
        .is_some_and(|sibling| abuts(sibling, |text| text.chars().next()));

    let mut out = String::with_capacity(emitted.len() + 2 * NOTEXTILE.len());
    if before {
        out.push_str(NOTEXTILE);
    }
    out.push_str(emitted);
    if after {
        out.push_str(NOTEXTILE);
    }
    out
}

/// A sibling needs a guard if it is text whose facing character is not whitespace, or any
/// element other than `<br>`.
fn abuts(sibling: &Node, facing: impl Fn(&str) -> Option<char>) -> bool {
    match sibling {
        Node::Text(text) => facing(text).is_some_and(|c| !c.is_whitespace()),
        Node::Element(element) => !element.is("br"),
    }
}
