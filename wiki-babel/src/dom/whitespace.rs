//! Whitespace collapsing
//!
//! Before serializing, whitespace in the tree is collapsed the way a browser lays it out, so the
//! markup does not inherit the indentation of the HTML source. Outside `pre`:
//!
//! - runs of ASCII whitespace become a single space;
//! - a leading space is dropped at the start of a block, after a `<br>`, or after text that
//!   already ends in a space;
//! - a trailing space is dropped before a block boundary or a `<br>`;
//! - text nodes left empty are removed.
//!
//! Elements are visited on the way in and (when they have children) on the way out, and both
//! visits count as a boundary for blocks.

use super::{is_block, is_void, Element, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Text,
    Element,
}

/// Collapse whitespace below `root` in place. `root` itself is treated as a block container.
pub fn collapse(root: &mut Element) {
    let mut visits = Vec::new();
    collect_visits(&root.children, &mut Vec::new(), &mut visits);

    let mut prev_text: Option<Vec<usize>> = None;
    let mut keep_leading_ws = false;

    for (path, visit) in visits {
        match visit {
            Visit::Text => {
                let Some(Node::Text(data)) = node_at_mut(root, &path) else {
                    continue;
                };
                let mut text = collapse_runs(data);
                let prev_ends_with_space = match &prev_text {
                    None => true,
                    Some(prev) => matches!(node_at(root, prev), Some(Node::Text(t)) if t.ends_with(' ')),
                };
                if prev_ends_with_space && !keep_leading_ws && text.starts_with(' ') {
                    text.remove(0);
                }
                let Some(Node::Text(data)) = node_at_mut(root, &path) else {
                    continue;
                };
                *data = text;
                if !data.is_empty() {
                    prev_text = Some(path);
                }
            }
            Visit::Element => {
                let Some(tag) = node_at(root, &path).and_then(Node::tag) else {
                    continue;
                };
                if is_block(tag) || tag == "br" {
                    if let Some(prev) = prev_text.take() {
                        trim_trailing_space(root, &prev);
                    }
                    keep_leading_ws = false;
                } else if is_void(tag) || tag == "pre" {
                    prev_text = None;
                    keep_leading_ws = true;
                } else if prev_text.is_some() {
                    keep_leading_ws = false;
                }
            }
        }
    }

    if let Some(prev) = prev_text {
        trim_trailing_space(root, &prev);
    }
    remove_empty_text(root);
}

fn collect_visits(children: &[Node], path: &mut Vec<usize>, out: &mut Vec<(Vec<usize>, Visit)>) {
    for (index, child) in children.iter().enumerate() {
        path.push(index);
        match child {
            Node::Text(_) => out.push((path.clone(), Visit::Text)),
            Node::Element(element) => {
                out.push((path.clone(), Visit::Element));
                if !element.is("pre") && !element.children.is_empty() {
                    collect_visits(&element.children, path, out);
                    out.push((path.clone(), Visit::Element));
                }
            }
        }
        path.pop();
    }
}

fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\r' | '\n') {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

fn trim_trailing_space(root: &mut Element, path: &[usize]) {
    if let Some(Node::Text(data)) = node_at_mut(root, path) {
        if data.ends_with(' ') {
            data.pop();
        }
    }
}

fn node_at<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    let mut node = root.children.get(*first)?;
    for index in rest {
        node = node.as_element()?.children.get(*index)?;
    }
    Some(node)
}

fn node_at_mut<'a>(root: &'a mut Element, path: &[usize]) -> Option<&'a mut Node> {
    let (first, rest) = path.split_first()?;
    let mut node = root.children.get_mut(*first)?;
    for index in rest {
        node = match node {
            Node::Element(element) => element.children.get_mut(*index)?,
            Node::Text(_) => return None,
        };
    }
    Some(node)
}

fn remove_empty_text(element: &mut Element) {
    if element.is("pre") {
        return;
    }
    element
        .children
        .retain(|child| !matches!(child, Node::Text(text) if text.is_empty()));
    for child in element.children.iter_mut() {
        if let Node::Element(inner) = child {
            remove_empty_text(inner);
        }
    }
}
