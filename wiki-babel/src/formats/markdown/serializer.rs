//! Markdown serialization
//!
//! Rich-text tree → Markdown through the ordered rule engine. Rules are tried in this order:
//! the wiki overrides, the GFM table rules, then the CommonMark vocabulary (ATX headings, `*`
//! bullets, `_em_`, `**strong**`, backtick code). Styled blocks and spans that Markdown cannot
//! express are written back as inline HTML.

use super::tables::TABLE_RULES;
use crate::common::links::{is_autolink, resolve_image_url};
use crate::common::rules::{ConvertContext, Filter, Rule, RuleSet};
use crate::common::text::{quote_block, with_single_trailing_newline};
use crate::dom::{Document, Element, NodeRef};
use crate::error::FormatError;
use once_cell::sync::Lazy;

pub static MARKDOWN_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new()
        .then(OVERRIDES)
        .then(TABLE_RULES)
        .then(BASE)
});

/// Serialize a rich-text tree to Markdown.
pub fn serialize_to_markdown(doc: &Document, context: &ConvertContext<'_>) -> Result<String, FormatError> {
    Ok(MARKDOWN_RULES.convert(doc, context))
}

#[rustfmt::skip]
const OVERRIDES: &[Rule] = &[
    Rule { name: "img", filter: Filter::Tag("img"), replacement: image },
    Rule { name: "blockquote", filter: Filter::Tag("blockquote"), replacement: blockquote },
    Rule { name: "pre", filter: Filter::Tag("pre"), replacement: fenced_code },
    Rule { name: "table", filter: Filter::Tag("table"), replacement: passthrough },
    Rule { name: "autolink", filter: Filter::Predicate(is_autolink_anchor), replacement: passthrough },
    Rule { name: "html-inline", filter: Filter::Tags(&["ins", "sup", "sub"]), replacement: same_tag },
    Rule { name: "del", filter: Filter::Tag("del"), replacement: strikethrough },
    Rule { name: "strikethrough", filter: Filter::Predicate(is_strike_span), replacement: strikethrough },
    Rule { name: "underline", filter: Filter::Predicate(is_underline_span), replacement: underline },
    Rule { name: "styled-span", filter: Filter::Predicate(is_styled_span), replacement: styled_span },
    Rule { name: "styled-paragraph", filter: Filter::Predicate(is_styled_paragraph), replacement: styled_paragraph },
    Rule { name: "styled-div", filter: Filter::Predicate(is_styled_div), replacement: styled_div },
    Rule { name: "br", filter: Filter::Tag("br"), replacement: line_break },
];

#[rustfmt::skip]
const BASE: &[Rule] = &[
    Rule { name: "paragraph", filter: Filter::Tag("p"), replacement: paragraph },
    Rule { name: "heading", filter: Filter::Tags(&["h1", "h2", "h3", "h4", "h5", "h6"]), replacement: heading },
    Rule { name: "list", filter: Filter::Tags(&["ul", "ol"]), replacement: list },
    Rule { name: "list-item", filter: Filter::Tag("li"), replacement: list_item },
    Rule { name: "hr", filter: Filter::Tag("hr"), replacement: horizontal_rule },
    Rule { name: "link", filter: Filter::Predicate(has_href), replacement: link },
    Rule { name: "emphasis", filter: Filter::Tags(&["em", "i"]), replacement: emphasis },
    Rule { name: "strong", filter: Filter::Tags(&["strong", "b"]), replacement: strong },
    Rule { name: "code", filter: Filter::Predicate(is_inline_code), replacement: inline_code },
];

fn is_autolink_anchor(node: &NodeRef<'_>) -> bool {
    node.element().is_some_and(|e| e.is("a") && is_autolink(e))
}

fn is_strike_span(node: &NodeRef<'_>) -> bool {
    node.element()
        .is_some_and(|e| e.is("span") && e.style.has("text-decoration", "line-through"))
}

fn is_underline_span(node: &NodeRef<'_>) -> bool {
    node.element()
        .is_some_and(|e| e.is("span") && e.style.has("text-decoration", "underline"))
}

fn has_style(node: &NodeRef<'_>, tag: &str) -> bool {
    node.element().is_some_and(|e| e.is(tag) && !e.style.is_empty())
}

fn is_styled_span(node: &NodeRef<'_>) -> bool {
    has_style(node, "span")
}

fn is_styled_paragraph(node: &NodeRef<'_>) -> bool {
    has_style(node, "p")
}

fn is_styled_div(node: &NodeRef<'_>) -> bool {
    has_style(node, "div")
}

fn has_href(node: &NodeRef<'_>) -> bool {
    node.element()
        .is_some_and(|e| e.is("a") && e.attr("href").is_some())
}

/// `code` that is not the only child of a `pre`.
fn is_inline_code(node: &NodeRef<'_>) -> bool {
    if !node.is("code") {
        return false;
    }
    let has_siblings = node.previous_sibling().is_some() || node.next_sibling().is_some();
    let in_pre = node.parent().is_some_and(|parent| parent.is("pre"));
    !(in_pre && !has_siblings)
}

fn passthrough(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    content.to_string()
}

fn image(_: &str, element: &Element, _: &NodeRef<'_>, context: &ConvertContext<'_>) -> String {
    let alt = element.attr("alt").unwrap_or_default();
    let src = resolve_image_url(element.attr("src").unwrap_or_default(), context.attachments);
    format!("![{alt}]({src})")
}

fn blockquote(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    quote_block(content)
}

/// `~~~lang` fence; the language comes from `data-code` on the `code` child or the `pre`.
fn fenced_code(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let language = element
        .sole_child()
        .and_then(|child| child.as_element())
        .filter(|child| child.is("code"))
        .and_then(|code| code.attr("data-code"))
        .or_else(|| element.attr("data-code"))
        .filter(|language| !language.is_empty());
    let info = language.map(|l| format!(" {l}")).unwrap_or_default();
    format!("~~~{info}\n{}~~~\n\n", with_single_trailing_newline(content))
}

fn same_tag(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("<{tag}>{content}</{tag}>", tag = element.tag)
}

fn strikethrough(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("~~{content}~~")
}

fn underline(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("<ins>{content}</ins>")
}

fn styled_span(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("<span style=\"{}\">{content}</span>", style_attribute(element))
}

fn styled_paragraph(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("<p style=\"{}\">{content}</p>\n", style_attribute(element))
}

fn styled_div(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("<div style=\"{}\">\n{content}\n</div>\n", style_attribute(element))
}

/// The element's style, escaped for a double-quoted attribute.
fn style_attribute(element: &Element) -> String {
    element
        .style
        .css_text()
        .replace('&', "&amp;")
        .replace('"', "&quot;")
}

/// A plain newline; no two-space hard break.
fn line_break(_: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    "\n".to_string()
}

fn paragraph(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("\n\n{content}\n\n")
}

fn heading(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let level = element.tag[1..].parse::<usize>().unwrap_or(1);
    format!("\n\n{} {content}\n\n", "#".repeat(level))
}

fn list(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let nested_last = node.parent().is_some_and(|parent| parent.is("li")) && node.is_last_element();
    if nested_last {
        format!("\n{content}")
    } else {
        format!("\n\n{content}\n\n")
    }
}

fn list_item(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let content = content.trim_start_matches('\n');
    let trimmed = content.trim_end_matches('\n');
    let content = if trimmed.len() < content.len() {
        format!("{trimmed}\n")
    } else {
        trimmed.to_string()
    };
    let content = content.replace('\n', "\n    ");

    let prefix = match node.parent().and_then(|parent| parent.element()) {
        Some(list) if list.is("ol") => {
            let start = list.attr("start").and_then(|s| s.trim().parse::<i64>().ok());
            let index = node.element_index() as i64;
            let number = start.map_or(index + 1, |start| start + index);
            format!("{number}.  ")
        }
        _ => "*   ".to_string(),
    };
    let separator = if node.next_sibling().is_some() && !content.ends_with('\n') {
        "\n"
    } else {
        ""
    };
    format!("{prefix}{content}{separator}")
}

fn horizontal_rule(_: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    "\n\n* * *\n\n".to_string()
}

fn link(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let href = element.attr("href").unwrap_or_default();
    match element.attr("title") {
        Some(title) if !title.is_empty() => format!("[{content}]({href} \"{title}\")"),
        _ => format!("[{content}]({href})"),
    }
}

fn emphasis(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    format!("_{content}_")
}

fn strong(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    format!("**{content}**")
}

/// Backtick fence one longer than the longest run inside; padded when the content starts or
/// ends with a backtick.
fn inline_code(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    if content.is_empty() {
        return String::new();
    }
    let content = content.replace("\r\n", " ").replace(['\r', '\n'], " ");
    let longest_run = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let padding = if content.starts_with('`') || content.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{padding}{content}{padding}{fence}")
}
