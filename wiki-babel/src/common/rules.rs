//! Ordered rule engine
//!
//!     Both dialects serialize the tree the same way: a depth-first, post-order walk where each
//!     element is replaced by the first rule whose filter matches it, after its children have
//!     been converted. The replacement receives the converted children as `content` and a
//!     [`NodeRef`] to look at attributes, siblings and ancestors.
//!
//!     Filters are not mutually exclusive (an anchor wrapping an image is also an anchor), so
//!     a [`RuleSet`] is strictly ordered: dialect overrides first, then the dialect's base rules.
//!     When nothing matches, block elements are wrapped in blank lines and inline elements pass
//!     their content through.
//!
//!     Around the rules the engine also takes care of:
//!     - whitespace collapsing of a private copy of the tree (see [`crate::dom::whitespace`]);
//!     - blank elements, which are dropped (or become a blank line when block-level);
//!     - flanking whitespace, which moves outside inline markup;
//!     - joining sibling outputs with at most one blank line between them; line breaks add
//!       their newline instead of merging with the separator before them.

use crate::common::links::AttachmentSet;
use crate::common::text::{append_line_break, join, post_process};
use crate::dom::{whitespace, Document, Element, Node, NodeRef, MEANINGFUL_WHEN_BLANK};

/// Replacement callback: converted content, the matched element, a cursor on it (for siblings
/// and ancestors), and the conversion context.
pub type Replacement = fn(&str, &Element, &NodeRef<'_>, &ConvertContext<'_>) -> String;

pub type Predicate = fn(&NodeRef<'_>) -> bool;

#[derive(Clone, Copy)]
pub enum Filter {
    Tag(&'static str),
    Tags(&'static [&'static str]),
    Predicate(Predicate),
}

impl Filter {
    pub fn matches(&self, node: &NodeRef<'_>) -> bool {
        match self {
            Filter::Tag(tag) => node.is(tag),
            Filter::Tags(tags) => node.is_any(tags),
            Filter::Predicate(predicate) => predicate(node),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub filter: Filter,
    pub replacement: Replacement,
}

/// Data the rules need besides the tree itself.
#[derive(Debug, Clone, Copy)]
pub struct ConvertContext<'a> {
    pub attachments: &'a AttachmentSet,
}

impl<'a> ConvertContext<'a> {
    pub fn new(attachments: &'a AttachmentSet) -> Self {
        ConvertContext { attachments }
    }
}

/// Ordered rules; the first match wins.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rules after the existing ones (lower precedence).
    pub fn then(mut self, rules: &[Rule]) -> Self {
        self.rules.extend_from_slice(rules);
        self
    }

    pub fn find(&self, node: &NodeRef<'_>) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.filter.matches(node))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Serialize a whole document with these rules.
    pub fn convert(&self, doc: &Document, context: &ConvertContext<'_>) -> String {
        let mut root = doc.root.clone();
        whitespace::collapse(&mut root);
        let root = Node::Element(root);
        let output = self.process(&NodeRef::root(&root), context);
        post_process(&output)
    }

    fn process(&self, parent: &NodeRef<'_>, context: &ConvertContext<'_>) -> String {
        let mut output = String::new();
        for child in parent.children() {
            output = match child.node() {
                Node::Text(text) => join(&output, text),
                Node::Element(element) if element.tag == "br" => {
                    append_line_break(&output, &self.replace(&child, context))
                }
                Node::Element(_) => join(&output, &self.replace(&child, context)),
            };
        }
        output
    }

    fn replace(&self, node: &NodeRef<'_>, context: &ConvertContext<'_>) -> String {
        let Some(element) = node.element() else {
            return node.text_content();
        };
        if REMOVED_ELEMENTS.contains(&element.tag.as_str()) {
            return String::new();
        }

        let (leading, trailing) = flanking_whitespace(node, element);
        let replaced = if is_blank(element) {
            if element.is_block() {
                "\n\n".to_string()
            } else {
                String::new()
            }
        } else {
            let content = self.process(node, context);
            let content = if leading.is_empty() && trailing.is_empty() {
                content
            } else {
                content.trim().to_string()
            };
            match self.find(node) {
                Some(rule) => {
                    log::trace!("rule '{}' matched <{}>", rule.name, element.tag);
                    (rule.replacement)(&content, element, node, context)
                }
                None if element.is_block() => format!("\n\n{content}\n\n"),
                None => content,
            }
        };
        format!("{leading}{replaced}{trailing}")
    }
}

/// Elements whose content never reaches the output.
const REMOVED_ELEMENTS: &[&str] = &["script", "style", "head", "template", "legend"];

/// No text, no void descendants, and not one of the elements that matter when empty.
pub fn is_blank(element: &Element) -> bool {
    fn meaningful(e: &Element) -> bool {
        e.is_void() || MEANINGFUL_WHEN_BLANK.contains(&e.tag.as_str())
    }
    !meaningful(element)
        && element.text_content().trim().is_empty()
        && !element.has_descendant(&meaningful)
}

/// Whitespace at the edges of an inline element moves outside its markup, unless the
/// neighbouring text already supplies it. An all-whitespace element only yields a leading space.
fn flanking_whitespace(node: &NodeRef<'_>, element: &Element) -> (&'static str, &'static str) {
    if element.is_block() || node.has_ancestor("pre") {
        return ("", "");
    }
    let text = element.text_content();
    if text.is_empty() {
        return ("", "");
    }
    let all_whitespace = text.trim().is_empty();
    let leading = text.starts_with(char::is_whitespace)
        && !node
            .previous_sibling()
            .and_then(Node::as_text)
            .is_some_and(|t| t.ends_with(char::is_whitespace));
    let trailing = !all_whitespace
        && text.ends_with(char::is_whitespace)
        && !node
            .next_sibling()
            .and_then(Node::as_text)
            .is_some_and(|t| t.starts_with(char::is_whitespace));
    (
        if leading { " " } else { "" },
        if trailing { " " } else { "" },
    )
}
