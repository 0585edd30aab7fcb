use crate::common::markdown;
use insta::assert_snapshot;

#[test]
fn test_header_alignment() {
    let out = markdown(
        r#"<table>
            <thead><tr><th align="center">A</th><th align="right">B</th><th>C</th></tr></thead>
            <tbody><tr><td>1</td><td>2</td><td>3</td></tr></tbody>
        </table>"#,
    );
    assert_snapshot!(out, @r"
| A | B | C |
| :-: | --: | --- |
| 1 | 2 | 3 |
");
}

#[test]
fn test_first_row_of_headers_is_a_heading_row() {
    assert_eq!(
        markdown("<table><tr><th>H</th></tr><tr><td>d</td></tr></table>"),
        "| H |\n| --- |\n| d |"
    );
}

#[test]
fn test_body_without_headers_has_no_separator() {
    assert_eq!(
        markdown("<table><tr><td>a</td><td>b</td></tr></table>"),
        "| a | b |"
    );
}

#[test]
fn test_table_between_paragraphs() {
    assert_eq!(
        markdown("<p>before</p><table><tr><td>x</td></tr></table><p>after</p>"),
        "before\n\n| x |\n\nafter"
    );
}
