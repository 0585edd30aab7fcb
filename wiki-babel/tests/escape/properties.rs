use proptest::prelude::*;
use wiki_babel::common::style_filter;
use wiki_babel::format::Format;
use wiki_babel::formats::{MarkdownFormat, TextileFormat};

const ALLOWED: &[&str] = &[
    "color", "width", "height", "border", "background", "padding", "margin", "font", "float",
];

fn entry() -> impl Strategy<Value = String> {
    let property = prop::sample::select(vec![
        "color", "width", "border-left", "padding-top", "text-align", "font-family", "display",
    ]);
    let value = prop::sample::select(vec![
        "red", "10px", "1.5em", "50%", "#abc", "rgb(1, 2, 3)", "url(x)", "Arial, serif",
    ]);
    (property, value).prop_map(|(p, v)| format!("{p}: {v}"))
}

proptest! {
    #[test]
    fn prop_plain_text_is_left_alone(s in "[a-zA-Z ,.]{0,60}") {
        prop_assert_eq!(TextileFormat.escape(&s), s.clone());
        prop_assert_eq!(MarkdownFormat.escape(&s), s);
    }

    #[test]
    fn prop_textile_escape_reverses(s in "[a-z0-9#:${}\\[\\] \n-]{0,60}") {
        let escaped = TextileFormat.escape(&s);
        prop_assert_eq!(TextileFormat.unescape(&escaped), s);
    }

    #[test]
    fn prop_markdown_escape_reverses(s in "[a-z0-9#:${}\\[\\] \n-]{0,60}") {
        let escaped = MarkdownFormat.escape(&s);
        prop_assert_eq!(MarkdownFormat.unescape(&escaped), s);
    }

    #[test]
    fn prop_style_filter_output_is_sorted_and_whitelisted(
        entries in prop::collection::vec(entry(), 0..6)
    ) {
        let filtered = style_filter::filter(&entries.join("; "));
        let parts: Vec<&str> = filtered.split_inclusive(';').map(str::trim).collect();
        let mut sorted = parts.clone();
        sorted.sort();
        prop_assert_eq!(&parts, &sorted);
        for part in parts {
            let property = part.split(':').next().unwrap_or_default();
            let base = property.split('-').next().unwrap_or_default();
            prop_assert!(ALLOWED.contains(&base), "unexpected entry {}", part);
            prop_assert!(!part.contains("rgb("));
        }
    }

    #[test]
    fn prop_style_filter_is_idempotent(entries in prop::collection::vec(entry(), 0..6)) {
        let once = style_filter::filter(&entries.join("; "));
        prop_assert_eq!(style_filter::filter(&once), once.clone());
    }
}
