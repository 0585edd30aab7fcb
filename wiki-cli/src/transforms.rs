//! Inspect transforms
//!
//! Views of the rich-text tree as the serializers see it, after HTML loading:
//!
//! - `tree-json`: the tree as JSON (`Element` tags, attributes, parsed style, children)
//! - `tree-text`: one line per node, indented by depth
//! - `text`: the concatenated text content

use serde_json::to_string_pretty;
use wiki_babel::dom::{parse_html, Document, Node};

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["tree-json", "tree-text", "text"];

pub fn execute_transform(html: &str, transform: &str) -> Result<String, String> {
    let doc = parse_html(html);
    match transform {
        "tree-json" => to_string_pretty(&doc)
            .map(|json| format!("{json}\n"))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "tree-text" => Ok(tree_text(&doc)),
        "text" => Ok(format!("{}\n", doc.text_content())),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn tree_text(doc: &Document) -> String {
    let mut out = String::new();
    for node in doc.children() {
        write_node(node, 0, &mut out);
    }
    out
}

fn write_node(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Text(text) => out.push_str(&format!("{indent}{text:?}\n")),
        Node::Element(element) => {
            let style = element.style.css_text();
            if style.is_empty() {
                out.push_str(&format!("{indent}<{}>\n", element.tag));
            } else {
                out.push_str(&format!("{indent}<{}> {{{style}}}\n", element.tag));
            }
            for child in &element.children {
                write_node(child, depth + 1, out);
            }
        }
    }
}
