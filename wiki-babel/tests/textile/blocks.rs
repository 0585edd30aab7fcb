use crate::common::textile;
use insta::assert_snapshot;

#[test]
fn test_headings_and_paragraphs() {
    let out = textile(
        r#"<h1>Title</h1>
        <p>One</p>
        <p style="text-align: right">Two</p>
        <p style="text-align: justify">Three</p>"#,
    );
    assert_snapshot!(out, @r"
h1. Title

One

p>. Two

p<>. Three
");
}

#[test]
fn test_blockquote() {
    assert_eq!(
        textile("<blockquote><p>a</p><p>b</p></blockquote>"),
        "> a\n> \n> b"
    );
}

#[test]
fn test_pre_with_language() {
    assert_eq!(
        textile("<pre><code class=\"ruby\">puts 1\n</code></pre>"),
        "<pre><code class=\"ruby\">\nputs 1\n</code></pre>"
    );
}

#[test]
fn test_pre_keeps_whitespace() {
    assert_eq!(
        textile("<pre>  a\n    b</pre>"),
        "<pre>\n  a\n    b\n</pre>"
    );
}

#[test]
fn test_horizontal_rule() {
    assert_eq!(textile("<p>a</p><hr><p>b</p>"), "a\n\n---\n\nb");
}

#[test]
fn test_lists() {
    assert_eq!(textile("<ol><li>one</li><li>two</li></ol>"), "# one\n# two");
    let out = textile(
        "<ul>
            <li>fruit
                <ul><li>apple</li><li>pear</li></ul>
            </li>
            <li>bread</li>
        </ul>",
    );
    assert_snapshot!(out, @r"
* fruit
** apple
** pear
* bread
");
}

#[test]
fn test_numbered_text_is_literal() {
    assert_eq!(textile("<p>1. not a list</p>"), "1. not a list");
}
