use crate::common::{fixed_clock, MockWidget, RecordingUploader};
use wiki_babel::editor::{
    ClipboardItem, EditorError, EditorOptions, LegacyClipboard, ModeCoordinator, PasteOutcome,
    StandardClipboard, VolatileModeStore,
};

fn image_clipboard() -> StandardClipboard {
    StandardClipboard {
        types: vec!["Files".to_string()],
        items: vec![ClipboardItem {
            mime: "image/png".to_string(),
            data: Some(vec![0x89, 0x50, 0x4e, 0x47]),
        }],
    }
}

fn coordinator(uploader: &RecordingUploader) -> ModeCoordinator<MockWidget, VolatileModeStore> {
    let mut coordinator = ModeCoordinator::new(EditorOptions::default(), VolatileModeStore)
        .unwrap()
        .with_uploader(uploader.clone())
        .with_clock(fixed_clock());
    coordinator.attach(MockWidget::default()).unwrap();
    coordinator
}

#[test]
fn test_pasted_image_is_uploaded_and_inserted() {
    let uploader = RecordingUploader::new(true);
    let mut coordinator = coordinator(&uploader);

    let outcome = coordinator.on_paste(&image_clipboard()).unwrap();
    assert_eq!(outcome, PasteOutcome::Consumed);

    let uploaded = uploader.uploaded.borrow();
    assert_eq!(uploaded.len(), 1);
    assert_eq!(uploaded[0].name, "20190102-030405-006.png");
    assert_eq!(uploaded[0].mime, "image/png");
    assert_eq!(uploaded[0].data, vec![0x89, 0x50, 0x4e, 0x47]);

    let widget = coordinator.widget().unwrap();
    assert_eq!(widget.inserted, vec!["<br>!20190102-030405-006.png!<br>"]);
    assert_eq!(coordinator.source(), "!20190102-030405-006.png!");
}

#[test]
fn test_refused_upload_inserts_nothing() {
    let uploader = RecordingUploader::new(false);
    let mut coordinator = coordinator(&uploader);

    assert_eq!(coordinator.on_paste(&image_clipboard()).unwrap(), PasteOutcome::Consumed);
    assert_eq!(uploader.uploaded.borrow().len(), 1);
    assert!(coordinator.widget().unwrap().inserted.is_empty());
}

#[test]
fn test_text_paste_is_left_to_the_widget() {
    let uploader = RecordingUploader::new(true);
    let mut coordinator = coordinator(&uploader);
    let clipboard = StandardClipboard {
        types: vec!["text/plain".to_string(), "text/html".to_string()],
        items: Vec::new(),
    };
    assert_eq!(coordinator.on_paste(&clipboard).unwrap(), PasteOutcome::Default);
    let legacy = LegacyClipboard {
        text: Some("hello".to_string()),
    };
    assert_eq!(coordinator.on_paste(&legacy).unwrap(), PasteOutcome::Default);
    assert!(uploader.uploaded.borrow().is_empty());
}

#[test]
fn test_file_and_unknown_pastes_are_swallowed() {
    let uploader = RecordingUploader::new(true);
    let mut coordinator = coordinator(&uploader);
    assert_eq!(
        coordinator.on_paste(&StandardClipboard::default()).unwrap(),
        PasteOutcome::Consumed
    );
    assert_eq!(
        coordinator.on_paste(&LegacyClipboard::default()).unwrap(),
        PasteOutcome::Consumed
    );
    assert_eq!(coordinator.on_drop(), PasteOutcome::Consumed);
    assert!(uploader.uploaded.borrow().is_empty());
}

#[test]
fn test_paste_before_attach_fails() {
    let mut coordinator: ModeCoordinator<MockWidget, VolatileModeStore> =
        ModeCoordinator::new(EditorOptions::default(), VolatileModeStore).unwrap();
    assert_eq!(
        coordinator.on_paste(&image_clipboard()),
        Err(EditorError::Uninitialized)
    );
}
