//! GFM pipe tables
//!
//! Cells become `| a | b |`; a heading row is followed by a separator row whose cells carry
//! the column alignment (`:--`, `--:`, `:-:`). A row counts as a heading row when it sits in
//! `thead`, or when it is the first row of the table (or of its first `tbody`) and holds only
//! `th` cells.

use crate::common::rules::{ConvertContext, Filter, Rule};
use crate::dom::{Element, Node, NodeRef};

#[rustfmt::skip]
pub const TABLE_RULES: &[Rule] = &[
    Rule { name: "table-section", filter: Filter::Tags(&["thead", "tbody", "tfoot"]), replacement: section },
    Rule { name: "table-row", filter: Filter::Tag("tr"), replacement: row },
    Rule { name: "table-cell", filter: Filter::Tags(&["th", "td"]), replacement: cell },
];

fn section(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    content.to_string()
}

fn cell(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    pipe_cell(content, node.element_index() == 0)
}

fn pipe_cell(content: &str, first: bool) -> String {
    let prefix = if first { "| " } else { " " };
    format!("{prefix}{content} |")
}

fn row(content: &str, element: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    if !is_heading_row(element, node) {
        return format!("\n{content}");
    }
    let separator: String = element
        .element_children()
        .enumerate()
        .map(|(index, cell)| {
            let border = match cell.attr("align").map(str::to_ascii_lowercase).as_deref() {
                Some("left") => ":--",
                Some("right") => "--:",
                Some("center") => ":-:",
                _ => "---",
            };
            pipe_cell(border, index == 0)
        })
        .collect();
    format!("\n{content}\n{separator}")
}

fn is_heading_row(row: &Element, node: &NodeRef<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    if parent.is("thead") {
        return true;
    }
    let first_row = node.element_index() == 0;
    let only_headers = row.element_children().all(|cell| cell.is("th"));
    first_row && only_headers && (parent.is("table") || is_first_tbody(parent))
}

fn is_first_tbody(section: &NodeRef<'_>) -> bool {
    if !section.is("tbody") {
        return false;
    }
    match section.previous_sibling() {
        None => true,
        Some(Node::Element(previous)) => {
            previous.is("thead") && previous.text_content().trim().is_empty()
        }
        Some(Node::Text(_)) => false,
    }
}
