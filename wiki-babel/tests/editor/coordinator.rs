use crate::common::{EchoRenderer, FailingRenderer, MockWidget, ParagraphRenderer};
use wiki_babel::common::links::AttachmentSet;
use wiki_babel::dom::parse_html;
use wiki_babel::editor::mode::DEFAULT_MODE_KEY;
use wiki_babel::editor::{
    EditorError, EditorOptions, ImageMenuEntry, KeyValueStore, KeyedModeStore,
    MemoryKeyValueStore, Mode, ModeCoordinator, ModeStore, VolatileModeStore,
};
use wiki_babel::render::RenderError;

type Coordinator = ModeCoordinator<MockWidget, VolatileModeStore>;

fn attached(options: EditorOptions) -> Coordinator {
    let mut coordinator = Coordinator::new(options, VolatileModeStore).unwrap();
    assert_eq!(coordinator.attach(MockWidget::default()).unwrap(), None);
    coordinator
}

fn keyed_store(initial: Option<&str>) -> KeyedModeStore<MemoryKeyValueStore> {
    let mut items = MemoryKeyValueStore::new();
    if let Some(mode) = initial {
        items.set_item(DEFAULT_MODE_KEY, mode);
    }
    KeyedModeStore::new(items, DEFAULT_MODE_KEY)
}

#[test]
fn test_unknown_format_is_rejected() {
    let err = Coordinator::new(EditorOptions::default().with_format("rst"), VolatileModeStore);
    assert!(matches!(err, Err(EditorError::Format(_))));
}

#[test]
fn test_mode_change_before_attach_fails() {
    let mut coordinator = Coordinator::new(EditorOptions::default(), VolatileModeStore).unwrap();
    assert!(!coordinator.is_initialized());
    assert_eq!(coordinator.change_mode(Mode::RichText), Err(EditorError::Uninitialized));
    assert_eq!(coordinator.mode(), Mode::Source);
}

#[test]
fn test_attach_restores_the_stored_mode() {
    let mut coordinator =
        ModeCoordinator::<MockWidget, _>::new(EditorOptions::default(), keyed_store(Some("visual"))).unwrap();
    coordinator.set_source("h1. Title");
    let pending = coordinator.attach(MockWidget::default()).unwrap().expect("render");
    assert_eq!(pending.target, Mode::RichText);
    assert_eq!(pending.request.text, "h1. Title ");
    assert_eq!(coordinator.mode(), Mode::RichText);
}

#[test]
fn test_unknown_stored_mode_falls_back_to_source() {
    let mut coordinator =
        ModeCoordinator::<MockWidget, _>::new(EditorOptions::default(), keyed_store(Some("wysiwyg"))).unwrap();
    assert_eq!(coordinator.attach(MockWidget::default()).unwrap(), None);
    assert_eq!(coordinator.mode(), Mode::Source);
}

#[test]
fn test_source_to_rich_text_and_back() {
    let mut coordinator = attached(EditorOptions::default());
    coordinator.set_source("*bold* #12");

    coordinator.change_mode_with(Mode::RichText, &ParagraphRenderer).unwrap();
    let widget = coordinator.widget().unwrap();
    assert_eq!(widget.loads, 1);
    assert_eq!(widget.doc, parse_html("<p>*bold* #12</p>"));

    coordinator.change_mode(Mode::Source).unwrap();
    assert_eq!(coordinator.source(), "*bold* #12");
    assert_eq!(coordinator.mode(), Mode::Source);
}

#[test]
fn test_rich_text_request_is_escaped() {
    let mut coordinator = attached(EditorOptions::default());
    coordinator.set_source("see #12");
    let pending = coordinator.change_mode(Mode::RichText).unwrap().unwrap();
    assert_eq!(pending.request.text, "see #$12 ");
}

#[test]
fn test_preview_renders_raw_source() {
    let mut coordinator = attached(EditorOptions::default());
    coordinator.set_source("see #12");
    let renderer = EchoRenderer::default();
    coordinator.change_mode_with(Mode::Preview, &renderer).unwrap();
    assert_eq!(renderer.requests.borrow()[0].text, "see #12 ");
    assert_eq!(coordinator.preview_html(), Some("see #12 "));
    assert_eq!(coordinator.widget().unwrap().loads, 0);
}

#[test]
fn test_focus_lost_syncs_the_source() {
    let mut coordinator = attached(EditorOptions::default());
    coordinator.change_mode_with(Mode::RichText, &ParagraphRenderer).unwrap();
    coordinator.widget_mut().unwrap().doc = parse_html("<p><strong>x</strong> y</p>");
    coordinator.on_focus_lost().unwrap();
    assert_eq!(coordinator.source(), "*x* y");
}

#[test]
fn test_focus_lost_in_source_mode_keeps_the_text() {
    let mut coordinator = attached(EditorOptions::default());
    coordinator.set_source("typed");
    coordinator.on_focus_lost().unwrap();
    assert_eq!(coordinator.source(), "typed");
}

#[test]
fn test_leaving_rich_text_for_preview_syncs_first() {
    let mut coordinator = attached(EditorOptions::default().with_format("markdown"));
    coordinator.change_mode_with(Mode::RichText, &ParagraphRenderer).unwrap();
    coordinator.widget_mut().unwrap().doc = parse_html("<h2>Edited</h2>");

    let pending = coordinator.change_mode(Mode::Preview).unwrap().unwrap();
    assert_eq!(coordinator.source(), "## Edited");
    assert_eq!(pending.request.text, "## Edited ");
}

#[test]
fn test_stale_preview_is_dropped() {
    let mut coordinator = attached(EditorOptions::default());
    let pending = coordinator.change_mode(Mode::Preview).unwrap().unwrap();
    coordinator.change_mode(Mode::Source).unwrap();

    let applied = coordinator
        .complete_render(&pending, Ok("<p>late</p>".to_string()))
        .unwrap();
    assert!(!applied);
    assert_eq!(coordinator.preview_html(), None);
}

#[test]
fn test_only_the_latest_rich_text_render_applies() {
    let mut coordinator = attached(EditorOptions::default());
    let first = coordinator.change_mode(Mode::RichText).unwrap().unwrap();
    let second = coordinator.update_visual_content().unwrap();
    assert!(second.generation > first.generation);

    assert!(!coordinator.complete_render(&first, Ok("<p>old</p>".into())).unwrap());
    assert!(coordinator.complete_render(&second, Ok("<p>new</p>".into())).unwrap());
    let widget = coordinator.widget().unwrap();
    assert_eq!(widget.loads, 1);
    assert_eq!(widget.doc, parse_html("<p>new</p>"));
}

#[test]
fn test_render_failure_is_reported_and_cleared() {
    let mut coordinator = attached(EditorOptions::default());
    let err = coordinator.change_mode_with(Mode::Preview, &FailingRenderer).unwrap_err();
    assert_eq!(
        err,
        EditorError::Render(RenderError::Transport("connection refused".to_string()))
    );
    assert_eq!(err.to_string(), "Renderer unreachable: connection refused");
    assert!(coordinator.render_error().is_some());
    assert_eq!(coordinator.preview_html(), None);

    coordinator.change_mode(Mode::Source).unwrap();
    assert!(coordinator.render_error().is_none());
}

#[test]
fn test_preview_is_not_persisted() {
    let mut coordinator =
        ModeCoordinator::<MockWidget, _>::new(EditorOptions::default(), keyed_store(None)).unwrap();
    coordinator.attach(MockWidget::default()).unwrap();

    coordinator.change_mode(Mode::RichText).unwrap();
    assert_eq!(coordinator.store().get(), Mode::RichText);
    coordinator.change_mode(Mode::Preview).unwrap();
    assert_eq!(coordinator.store().get(), Mode::RichText);
    assert_eq!(
        coordinator.store().inner().get_item(DEFAULT_MODE_KEY).as_deref(),
        Some("visual")
    );
    coordinator.change_mode(Mode::Source).unwrap();
    assert_eq!(coordinator.store().get(), Mode::Source);
}

#[test]
fn test_image_menu_lists_image_attachments() {
    let attachments = AttachmentSet::from(vec![
        "a.png".to_string(),
        "notes.txt".to_string(),
        "B.JPG".to_string(),
    ]);
    let coordinator = attached(EditorOptions::default().with_attachments(attachments));
    let expected = vec![ImageMenuEntry::new("a.png"), ImageMenuEntry::new("B.JPG")];
    assert_eq!(coordinator.image_menu(), expected.as_slice());
    assert_eq!(coordinator.widget().unwrap().menu, expected);
}

#[test]
fn test_focus_gained_refreshes_the_menu() {
    let mut coordinator = attached(EditorOptions::default());
    assert!(coordinator.image_menu().is_empty());
    coordinator.set_attachments(AttachmentSet::from(vec!["new.gif".to_string()]));
    coordinator.on_focus_gained().unwrap();
    assert_eq!(coordinator.widget().unwrap().menu, vec![ImageMenuEntry::new("new.gif")]);
}

#[test]
fn test_activating_an_image_entry_inserts_markup() {
    let attachments = AttachmentSet::from(vec!["a.png".to_string()]);
    let mut coordinator =
        attached(EditorOptions::default().with_format("markdown").with_attachments(attachments));
    let entry = coordinator.image_menu()[0].clone();

    let pending = coordinator.activate_image_entry(&entry).unwrap();
    assert_eq!(coordinator.widget().unwrap().inserted, vec!["<br>![](a.png)<br>"]);
    assert_eq!(coordinator.source(), "![](a.png)");
    assert_eq!(pending.target, Mode::RichText);
    assert_eq!(pending.request.text, "![](a.png) ");
}

#[test]
fn test_reentering_rich_text_keeps_widget_edits() {
    let mut coordinator = attached(EditorOptions::default());
    coordinator.set_source("old");
    coordinator.change_mode_with(Mode::RichText, &ParagraphRenderer).unwrap();
    coordinator.widget_mut().unwrap().doc = parse_html("<p><strong>edited</strong></p>");

    let renderer = EchoRenderer::default();
    coordinator.change_mode_with(Mode::RichText, &renderer).unwrap();
    assert_eq!(coordinator.source(), "*edited*");
    assert_eq!(renderer.requests.borrow()[0].text, "*edited* ");
}

#[test]
fn test_update_visual_content_keeps_a_pending_preview() {
    let mut coordinator = attached(EditorOptions::default());
    coordinator.set_source("h1. Title");
    let preview = coordinator.change_mode(Mode::Preview).unwrap().unwrap();
    let visual = coordinator.update_visual_content().unwrap();

    assert!(coordinator
        .complete_render(&preview, Ok("<h1>Title</h1>".into()))
        .unwrap());
    assert_eq!(coordinator.preview_html(), Some("<h1>Title</h1>"));
    assert!(coordinator.complete_render(&visual, Ok("<h1>Title</h1>".into())).unwrap());
    assert_eq!(coordinator.mode(), Mode::Preview);
}

#[test]
fn test_leaving_preview_drops_its_pending_render() {
    let mut coordinator = attached(EditorOptions::default());
    let preview = coordinator.change_mode(Mode::Preview).unwrap().unwrap();
    let visual = coordinator.change_mode(Mode::RichText).unwrap().unwrap();

    assert!(!coordinator.complete_render(&preview, Ok("<p>late</p>".into())).unwrap());
    assert!(coordinator.complete_render(&visual, Ok("<p>now</p>".into())).unwrap());
}
