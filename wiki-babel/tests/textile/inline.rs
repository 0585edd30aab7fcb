use crate::common::{textile, textile_with};
use wiki_babel::common::links::AttachmentSet;

#[test]
fn test_strong() {
    assert_eq!(textile("<p><strong>hi</strong></p>"), "*hi*");
}

#[test]
fn test_strong_with_rgb_color() {
    assert_eq!(
        textile(r#"<p><strong style="color: rgb(255, 0, 0)">x</strong></p>"#),
        "*{color: #ff0000;}x*"
    );
}

#[test]
fn test_guard_between_words() {
    assert_eq!(
        textile("<p>x<em>y</em>z</p>"),
        "x<notextile></notextile>_y_<notextile></notextile>z"
    );
}

#[test]
fn test_no_guard_after_line_break() {
    assert_eq!(textile("<p>a<br><em>b</em></p>"), "a\n_b_");
}

#[test]
fn test_consecutive_line_breaks_leave_a_blank_line() {
    assert_eq!(textile("<p>a<br><br>b</p>"), "a\n\nb");
}

#[test]
fn test_guard_between_elements() {
    assert_eq!(
        textile("<p><strong>a</strong><em>b</em></p>"),
        "*a*<notextile></notextile><notextile></notextile>_b_"
    );
}

#[test]
fn test_decoration_spans() {
    assert_eq!(
        textile(r#"<p><span style="text-decoration: underline">u</span></p>"#),
        "+u+"
    );
    assert_eq!(
        textile(r#"<p><span style="text-decoration: line-through; color: red">s</span></p>"#),
        "-{color: red;}s-"
    );
}

#[test]
fn test_autolinks_are_bare() {
    assert_eq!(
        textile(r#"<p><a href="https://example.org/">https://example.org</a></p>"#),
        "https://example.org"
    );
    assert_eq!(
        textile(r#"<p><a href="mailto:me@example.org">me@example.org</a></p>"#),
        "me@example.org"
    );
}

#[test]
fn test_links() {
    assert_eq!(textile(r#"<p><a href="/issues">issues</a></p>"#), "\"issues\":/issues");
}

#[test]
fn test_linked_image() {
    assert_eq!(
        textile(r#"<p><a href="https://example.org"><img src="https://example.org/logo.png"></a></p>"#),
        "!https://example.org/logo.png!:https://example.org"
    );
}

#[test]
fn test_empty_anchor_is_dropped() {
    assert_eq!(textile(r#"<p>a<a name="x"></a>b</p>"#), "ab");
}

#[test]
fn test_abbreviation() {
    assert_eq!(
        textile(r#"<p><abbr title="World Wide Web">WWW</abbr></p>"#),
        "WWW(World Wide Web)"
    );
}

#[test]
fn test_phrase_modifiers() {
    assert_eq!(
        textile("<p><b>b</b> <i>i</i> <cite>c</cite> <del>d</del> <ins>n</ins> <sup>p</sup> <sub>s</sub></p>"),
        "**b** __i__ ??c?? -d- +n+ ^p^ ~s~"
    );
}

#[test]
fn test_inline_code() {
    assert_eq!(textile("<p>run <code>make</code> now</p>"), "run @make@ now");
}

#[test]
fn test_images() {
    let attachments = AttachmentSet::from(vec!["shot.png".to_string()]);
    assert_eq!(
        textile_with(
            r#"<p><img src="/attachments/download/12/shot.png" alt="Shot" style="width: 50%; float: right"></p>"#,
            &attachments
        ),
        "!{float: right; width: 50%;}shot.png(Shot)!"
    );
    assert_eq!(
        textile_with(r#"<p><img src="/attachments/download/12/other.png"></p>"#, &attachments),
        "!/attachments/download/12/other.png!"
    );
}

#[test]
fn test_unsafe_styles_are_dropped() {
    assert_eq!(
        textile(r#"<p><strong style="position: absolute; color: url(x)">x</strong></p>"#),
        "*x*"
    );
}
