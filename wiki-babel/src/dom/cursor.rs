//! Tree cursor
//!
//! A [`NodeRef`] points at one node together with the slice of its siblings and the chain of
//! ancestors, so rule predicates can look left, right and up without the tree carrying parent
//! pointers.

use super::{Element, Node};

#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    node: &'a Node,
    siblings: &'a [Node],
    index: usize,
    parent: Option<&'a NodeRef<'a>>,
}

impl<'a> NodeRef<'a> {
    /// A cursor on a node without parent or siblings.
    pub fn root(node: &'a Node) -> Self {
        NodeRef {
            node,
            siblings: std::slice::from_ref(node),
            index: 0,
            parent: None,
        }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn element(&self) -> Option<&'a Element> {
        self.node.as_element()
    }

    pub fn tag(&self) -> Option<&'a str> {
        self.element().map(|e| e.tag.as_str())
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    pub fn is_any(&self, tags: &[&str]) -> bool {
        self.tag().is_some_and(|t| tags.contains(&t))
    }

    pub fn parent(&self) -> Option<&'a NodeRef<'a>> {
        self.parent
    }

    /// Position among the parent's child nodes (text included).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn previous_sibling(&self) -> Option<&'a Node> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.siblings.get(i))
    }

    pub fn next_sibling(&self) -> Option<&'a Node> {
        self.siblings.get(self.index + 1)
    }

    /// Position among the element siblings only (`element.children` in DOM terms).
    pub fn element_index(&self) -> usize {
        self.siblings[..self.index]
            .iter()
            .filter(|n| n.as_element().is_some())
            .count()
    }

    /// No element follows this node among its siblings.
    pub fn is_last_element(&self) -> bool {
        self.siblings[self.index + 1..]
            .iter()
            .all(|n| n.as_element().is_none())
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        let nodes: &[Node] = match self.node {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        };
        nodes.iter().enumerate().map(move |(index, node)| NodeRef {
            node,
            siblings: nodes,
            index,
            parent: Some(self),
        })
    }

    pub fn ancestors(&self) -> impl Iterator<Item = &'a NodeRef<'a>> {
        std::iter::successors(self.parent, |p| p.parent)
    }

    pub fn has_ancestor(&self, tag: &str) -> bool {
        self.ancestors().any(|a| a.is(tag))
    }

    pub fn text_content(&self) -> String {
        self.node.text_content()
    }
}
