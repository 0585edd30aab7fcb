use crate::common::EchoRenderer;
use wiki_babel::format::Format;
use wiki_babel::formats::MarkdownFormat;
use wiki_babel::render::{RenderRequest, Renderer};

#[test]
fn test_fence_language_is_moved_inside_the_block() {
    let escaped = MarkdownFormat.escape("text\n\n~~~ python\nprint(1)\n~~~\n");
    assert_eq!(escaped, "text\n\n~~~\npython+-*/!?\nprint(1)\n~~~\n");
}

#[test]
fn test_backtick_fences_become_tilde_fences() {
    let escaped = MarkdownFormat.escape("```sh\nls\n```");
    assert_eq!(escaped, "~~~\nsh+-*/!?\nls\n~~~");
}

#[test]
fn test_marker_in_rendered_code_becomes_data_code() {
    let html = "<pre><code>python+-*/!?\nprint(1)\n</code></pre>\n";
    assert_eq!(
        MarkdownFormat.unescape(html),
        "<pre><code data-code=\"python\">print(1)\n</code></pre>\n"
    );
}

#[test]
fn test_references_inside_code_are_restored() {
    let renderer = EchoRenderer::default();
    let source = "~~~ sh\necho #1 \n~~~";
    let request = RenderRequest::new(&MarkdownFormat.escape(source), Vec::new());
    let html = renderer.render(&request).expect("echo");
    assert_eq!(renderer.requests.borrow().len(), 1);
    assert!(!html.contains("#1 "));
    assert_eq!(MarkdownFormat.unescape(&html), "~~~\nsh+-*/!?\necho #1 \n~~~ ");
}

#[test]
fn test_unescape_strips_named_anchors() {
    assert_eq!(
        MarkdownFormat.unescape("<h1><a name=\"x\"></a>T</h1>"),
        "<h1>T</h1>"
    );
}
