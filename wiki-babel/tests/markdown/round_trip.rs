use wiki_babel::common::links::AttachmentSet;
use wiki_babel::common::rules::ConvertContext;
use wiki_babel::format::Format;
use wiki_babel::formats::markdown::preview::CommonMarkRenderer;
use wiki_babel::formats::MarkdownFormat;
use wiki_babel::transforms::markup_to_document;

/// Markdown → escape → comrak → unescape → tree → Markdown.
fn round_trip(source: &str) -> String {
    let doc = markup_to_document(source, "markdown", &CommonMarkRenderer::new(), Vec::new())
        .expect("local render");
    MarkdownFormat
        .serialize(&doc, &ConvertContext::new(&AttachmentSet::default()))
        .expect("markdown serialization")
}

#[test]
fn test_inline_markup() {
    let source = "# Title\n\nSome _text_ with **weight** and `code`.";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_bullets() {
    let source = "*   one\n*   two";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_fenced_code_keeps_language() {
    let source = "~~~ ruby\nputs 1\n~~~";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_references_are_not_linked() {
    let source = "see #123 and r45, costs $5";
    assert_eq!(round_trip(source), source);
}

#[test]
fn test_strikethrough() {
    assert_eq!(round_trip("~~gone~~"), "~~gone~~");
}

#[test]
fn test_table() {
    let source = "| a | b |\n| --- | --- |\n| 1 | 2 |";
    assert_eq!(round_trip(source), source);
}
