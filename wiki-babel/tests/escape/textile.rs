use crate::common::EchoRenderer;
use wiki_babel::format::Format;
use wiki_babel::formats::TextileFormat;
use wiki_babel::render::{RenderRequest, Renderer};

fn through_echo(source: &str) -> String {
    let renderer = EchoRenderer::default();
    let request = RenderRequest::new(&TextileFormat.escape(source), Vec::new());
    let html = renderer.render(&request).expect("echo");
    TextileFormat.unescape(&html)
}

#[test]
fn test_macro_and_wiki_link_openers() {
    let escaped = TextileFormat.escape("{{toc}} and [[Page]]");
    assert_eq!(escaped, "{${toc}} and [$[Page]]");
    assert_eq!(through_echo("{{toc}} and [[Page]]"), "{{toc}} and [[Page]] ");
}

#[test]
fn test_every_reference_prefix_is_defused() {
    for prefix in wiki_babel::common::escape::REFERENCE_PREFIXES {
        let source = format!("{prefix}:thing");
        let escaped = TextileFormat.escape(&source);
        assert_eq!(escaped, format!("{prefix}$:thing"));
        assert_eq!(through_echo(&source), format!("{source} "));
    }
}

#[test]
fn test_issue_and_revision_shapes() {
    assert_eq!(TextileFormat.escape("#12 r34"), "#$12 r$34");
    assert_eq!(TextileFormat.escape("#12-3 and #12#note-4 end"), "#$12-3 and #$12#note-4 end");
    // Not followed by whitespace: left alone
    assert_eq!(TextileFormat.escape("#12a r3x"), "#12a r3x");
    assert_eq!(TextileFormat.escape("#0 r0"), "#0 r0");
}

#[test]
fn test_dollar_signs_survive() {
    assert_eq!(through_echo("$ $$ a$b"), "$ $$ a$b ");
}

#[test]
fn test_renderer_artifacts_are_stripped() {
    let html = concat!(
        "<fieldset><legend>Table of contents</legend></fieldset>",
        "<h2><a name=\"Intro\"></a>Intro<a href=\"#Intro\" class=\"wiki-anchor\">&para;</a></h2>",
    );
    assert_eq!(TextileFormat.unescape(html), "<fieldset></fieldset><h2>Intro</h2>");
}

#[test]
fn test_external_links_are_kept() {
    let html = r#"<p><a href="http://example.org/#top">x</a></p>"#;
    assert_eq!(TextileFormat.unescape(html), html);
}
