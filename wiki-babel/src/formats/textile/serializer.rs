//! Textile serialization
//!
//! Rich-text tree → Textile, through the ordered rule engine. The first table holds the
//! overrides the wiki needs (styled spans, linked images, tables with cell attributes, `pre`
//! blocks kept as HTML); the second one is the plain Textile vocabulary they fall back to.

use crate::common::adjacency::guard;
use crate::common::links::{is_autolink, resolve_image_url};
use crate::common::rules::{ConvertContext, Filter, Rule, RuleSet};
use crate::common::style_filter::{style_marker, style_marker_without_percentages};
use crate::common::text::{quote_block, remove_blank_lines, with_single_trailing_newline};
use crate::dom::{Document, Element, NodeRef};
use crate::error::FormatError;
use once_cell::sync::Lazy;

pub static TEXTILE_RULES: Lazy<RuleSet> = Lazy::new(|| RuleSet::new().then(OVERRIDES).then(BASE));

/// Serialize a rich-text tree to Textile.
pub fn serialize_to_textile(doc: &Document, context: &ConvertContext<'_>) -> Result<String, FormatError> {
    Ok(TEXTILE_RULES.convert(doc, context))
}

#[rustfmt::skip]
const OVERRIDES: &[Rule] = &[
    Rule { name: "br", filter: Filter::Tag("br"), replacement: line_break },
    Rule { name: "underline", filter: Filter::Predicate(is_underline_span), replacement: underline },
    Rule { name: "strikethrough", filter: Filter::Predicate(is_strike_span), replacement: strikethrough },
    Rule { name: "span", filter: Filter::Tag("span"), replacement: span },
    Rule { name: "strong", filter: Filter::Tag("strong"), replacement: strong },
    Rule { name: "em", filter: Filter::Tag("em"), replacement: emphasis },
    Rule { name: "autolink", filter: Filter::Predicate(is_autolink_anchor), replacement: passthrough },
    Rule { name: "img", filter: Filter::Tag("img"), replacement: image },
    Rule { name: "linked-image", filter: Filter::Predicate(is_linked_image), replacement: linked_image },
    Rule { name: "empty-anchor", filter: Filter::Predicate(is_empty_anchor), replacement: nothing },
    Rule { name: "abbr", filter: Filter::Tag("abbr"), replacement: abbreviation },
    Rule { name: "hr", filter: Filter::Tag("hr"), replacement: horizontal_rule },
    Rule { name: "pre", filter: Filter::Tag("pre"), replacement: preformatted },
    Rule { name: "blockquote", filter: Filter::Tag("blockquote"), replacement: blockquote },
    Rule { name: "table", filter: Filter::Tag("table"), replacement: table },
    Rule { name: "table-section", filter: Filter::Tags(&["thead", "tbody", "tfoot"]), replacement: passthrough },
    Rule { name: "tr", filter: Filter::Tag("tr"), replacement: table_row },
    Rule { name: "cell", filter: Filter::Tags(&["th", "td"]), replacement: table_cell },
];

#[rustfmt::skip]
const BASE: &[Rule] = &[
    Rule { name: "paragraph", filter: Filter::Tag("p"), replacement: paragraph },
    Rule { name: "heading", filter: Filter::Tags(&["h1", "h2", "h3", "h4", "h5", "h6"]), replacement: heading },
    Rule { name: "list", filter: Filter::Tags(&["ul", "ol"]), replacement: list },
    Rule { name: "list-item", filter: Filter::Tag("li"), replacement: list_item },
    Rule { name: "link", filter: Filter::Predicate(has_href), replacement: link },
    Rule { name: "code", filter: Filter::Tag("code"), replacement: code },
    Rule { name: "b", filter: Filter::Tag("b"), replacement: bold },
    Rule { name: "i", filter: Filter::Tag("i"), replacement: italic },
    Rule { name: "cite", filter: Filter::Tag("cite"), replacement: citation },
    Rule { name: "deleted", filter: Filter::Tags(&["del", "s", "strike"]), replacement: deleted },
    Rule { name: "inserted", filter: Filter::Tags(&["ins", "u"]), replacement: inserted },
    Rule { name: "sup", filter: Filter::Tag("sup"), replacement: superscript },
    Rule { name: "sub", filter: Filter::Tag("sub"), replacement: subscript },
];

// Filters

fn is_underline_span(node: &NodeRef<'_>) -> bool {
    node.element()
        .is_some_and(|e| e.is("span") && e.style.has("text-decoration", "underline"))
}

fn is_strike_span(node: &NodeRef<'_>) -> bool {
    node.element()
        .is_some_and(|e| e.is("span") && e.style.has("text-decoration", "line-through"))
}

fn is_autolink_anchor(node: &NodeRef<'_>) -> bool {
    node.element().is_some_and(|e| e.is("a") && is_autolink(e))
}

fn is_linked_image(node: &NodeRef<'_>) -> bool {
    node.element().is_some_and(|e| {
        e.is("a") && e.sole_child().is_some_and(|child| child.is_element("img"))
    })
}

fn is_empty_anchor(node: &NodeRef<'_>) -> bool {
    node.element()
        .is_some_and(|e| e.is("a") && e.text_content().is_empty())
}

fn has_href(node: &NodeRef<'_>) -> bool {
    node.element()
        .is_some_and(|e| e.is("a") && e.attr("href").is_some())
}

// Overrides

fn line_break(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("{content}\n")
}

fn underline(content: &str, element: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("+{}{content}+", style_marker(&element.style)))
}

fn strikethrough(content: &str, element: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("-{}{content}-", style_marker(&element.style)))
}

fn span(content: &str, element: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let marker = style_marker_without_percentages(&element.style);
    guard(node, &format!("%{marker}{content}%"))
}

fn strong(content: &str, element: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("*{}{content}*", style_marker(&element.style)))
}

fn emphasis(content: &str, element: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("_{}{content}_", style_marker(&element.style)))
}

fn passthrough(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    content.to_string()
}

fn nothing(_: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    String::new()
}

fn image(_: &str, element: &Element, _: &NodeRef<'_>, context: &ConvertContext<'_>) -> String {
    image_markup(element, context)
}

fn linked_image(_: &str, element: &Element, _: &NodeRef<'_>, context: &ConvertContext<'_>) -> String {
    let href = element.attr("href").unwrap_or_default();
    match element.element_children().next() {
        Some(img) => format!("{}:{href}", image_markup(img, context)),
        None => String::new(),
    }
}

/// `!{style}url(alt)!`
fn image_markup(img: &Element, context: &ConvertContext<'_>) -> String {
    let src = resolve_image_url(img.attr("src").unwrap_or_default(), context.attachments);
    let alt = match img.attr("alt") {
        Some(alt) if !alt.is_empty() => format!("({alt})"),
        _ => String::new(),
    };
    format!("!{}{src}{alt}!", style_marker(&img.style))
}

fn abbreviation(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("{content}({})", element.attr("title").unwrap_or_default())
}

fn horizontal_rule(_: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    "---".to_string()
}

fn preformatted(_: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let text = with_single_trailing_newline(&element.text_content());
    match element.sole_child().and_then(|child| child.as_element()) {
        Some(code) if code.is("code") => {
            let class = code
                .attr("class")
                .filter(|class| !class.is_empty())
                .map(|class| format!(" class=\"{class}\""))
                .unwrap_or_default();
            format!("\n\n<pre><code{class}>\n{text}</code></pre>\n\n")
        }
        _ => format!("\n\n<pre>\n{text}</pre>\n\n"),
    }
}

fn blockquote(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    quote_block(content)
}

fn table(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let marker = style_marker(&element.style);
    let signature = if marker.is_empty() {
        String::new()
    } else {
        format!("table{marker}.\n")
    };
    format!("{signature}{content}\n")
}

fn table_row(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let marker = style_marker(&element.style);
    let signature = if marker.is_empty() {
        String::new()
    } else {
        format!("{marker}. ")
    };
    format!("{signature}|{content}\n")
}

fn table_cell(content: &str, element: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("{} {} |", cell_attributes(element, node), remove_blank_lines(content))
}

/// `_` header, `\N` colspan, `/N` rowspan, alignment glyphs, style; suffixed with `.`.
fn cell_attributes(cell: &Element, node: &NodeRef<'_>) -> String {
    let mut attributes = String::new();
    let in_head = node
        .parent()
        .and_then(|row| row.parent())
        .is_some_and(|section| section.is("thead"));
    if cell.is("th") || in_head {
        attributes.push('_');
    }
    let colspan = cell.span_attr("colspan");
    if colspan > 1 {
        attributes.push_str(&format!("\\{colspan}"));
    }
    let rowspan = cell.span_attr("rowspan");
    if rowspan > 1 {
        attributes.push_str(&format!("/{rowspan}"));
    }
    match cell.style.get("text-align") {
        Some("center") => attributes.push('='),
        Some("right") => attributes.push('>'),
        Some("left") => attributes.push('<'),
        _ => {}
    }
    match cell.style.get("vertical-align") {
        Some("top") => attributes.push('^'),
        Some("bottom") => attributes.push('~'),
        _ => {}
    }
    attributes.push_str(&style_marker(&cell.style));
    if !attributes.is_empty() {
        attributes.push('.');
    }
    attributes
}

// Base vocabulary

/// Alignment glyph followed by the style marker.
fn block_signature(element: &Element) -> String {
    let align = match element.style.get("text-align") {
        Some("left") => "<",
        Some("right") => ">",
        Some("center") => "=",
        Some("justify") => "<>",
        _ => "",
    };
    format!("{align}{}", style_marker(&element.style))
}

fn paragraph(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let signature = block_signature(element);
    if signature.is_empty() {
        format!("\n\n{content}\n\n")
    } else {
        format!("\n\np{signature}. {content}\n\n")
    }
}

fn heading(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("\n\n{}{}. {content}\n\n", element.tag, block_signature(element))
}

fn list(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    if node.parent().is_some_and(|parent| parent.is("li")) {
        format!("\n{content}\n")
    } else {
        format!("\n\n{content}\n\n")
    }
}

/// One marker per enclosing list, outermost first: `*` for `ul`, `#` for `ol`.
fn list_item(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let mut marker: Vec<char> = node
        .ancestors()
        .filter_map(|ancestor| match ancestor.tag() {
            Some("ul") => Some('*'),
            Some("ol") => Some('#'),
            _ => None,
        })
        .collect();
    if marker.is_empty() {
        marker.push('*');
    }
    marker.reverse();
    let marker: String = marker.into_iter().collect();
    format!("{marker} {}\n", remove_blank_lines(content.trim()))
}

fn link(content: &str, element: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    let href = element.attr("href").unwrap_or_default();
    match element.attr("title") {
        Some(title) if !title.is_empty() => format!("\"{content}({title})\":{href}"),
        _ => format!("\"{content}\":{href}"),
    }
}

fn code(content: &str, _: &Element, _: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    format!("@{content}@")
}

fn bold(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("**{content}**"))
}

fn italic(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("__{content}__"))
}

fn citation(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("??{content}??"))
}

fn deleted(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("-{content}-"))
}

fn inserted(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("+{content}+"))
}

fn superscript(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("^{content}^"))
}

fn subscript(content: &str, _: &Element, node: &NodeRef<'_>, _: &ConvertContext<'_>) -> String {
    guard(node, &format!("~{content}~"))
}
