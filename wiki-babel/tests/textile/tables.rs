use crate::common::textile;
use insta::assert_snapshot;

#[test]
fn test_centered_header_cell() {
    let out = textile(
        r#"<table>
            <thead><tr><th style="text-align: center">A</th><th>B</th></tr></thead>
            <tbody><tr><td>1</td><td>2</td></tr></tbody>
        </table>"#,
    );
    assert_snapshot!(out, @r"
|_=. A |_. B |
| 1 | 2 |
");
}

#[test]
fn test_td_in_thead_is_a_header() {
    assert_eq!(
        textile("<table><thead><tr><td>h</td></tr></thead></table>"),
        "|_. h |"
    );
}

#[test]
fn test_spans_alignment_and_styles() {
    let out = textile(
        r#"<table style="border: 1px"><tr style="color: blue"><td colspan="2" rowspan="3" style="vertical-align: top">x</td><td style="text-align: right; vertical-align: bottom; width: 10px">y</td></tr></table>"#,
    );
    assert_snapshot!(out, @r"
table{border: 1px;}.
{color: blue;}. |\2/3^. x |>~{width: 10px;}. y |
");
}

#[test]
fn test_table_between_paragraphs() {
    assert_eq!(
        textile("<p>before</p><table><tr><td>c</td></tr></table><p>after</p>"),
        "before\n\n| c |\n\nafter"
    );
}
