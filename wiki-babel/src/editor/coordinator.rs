//! Mode Coordinator
//!
//!     Keeps the markup source and the rich-text tree in step while the user switches between
//!     the three modes. Only one of the two is authoritative at a time:
//!
//!     - source → rich text: escape the source, render it, unescape, load the tree;
//!     - source → preview: render the raw source, show the HTML as is;
//!     - rich text → anything: serialize the tree back into the source first;
//!     - preview → anything: nothing to sync, the source is already current.
//!
//!     Renders are asynchronous on the host side. The rich-text view and the preview each keep a
//!     generation counter. A transition bumps both; issuing a render bumps only its own view's.
//!     Each [`PendingRender`] carries the generation it was issued under, and a response arriving
//!     after a transition or after a newer render for the same view is dropped.

use super::mode::{Mode, ModeStore};
use super::options::EditorOptions;
use super::paste::{
    pasted_image_name, AttachmentUploader, Clipboard, Clock, NoUploader, PasteKind, PasteOutcome,
    PastedImage, SystemClock,
};
use super::widget::{EditorWidget, ImageMenuEntry};
use super::EditorError;
use crate::common::links::AttachmentSet;
use crate::common::rules::ConvertContext;
use crate::dom::parse_html;
use crate::format::Format;
use crate::formats;
use crate::render::{AttachmentParam, RenderError, RenderRequest, Renderer};

/// A render the host must perform and report back through
/// [`ModeCoordinator::complete_render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRender {
    pub generation: u64,
    pub target: Mode,
    pub request: RenderRequest,
}

pub struct ModeCoordinator<W, S> {
    format: Box<dyn Format>,
    widget: Option<W>,
    store: S,
    uploader: Box<dyn AttachmentUploader>,
    clock: Box<dyn Clock>,
    options: EditorOptions,
    attachment_params: Vec<AttachmentParam>,
    source: String,
    mode: Mode,
    generations: Generations,
    image_menu: Vec<ImageMenuEntry>,
    preview_html: Option<String>,
    render_error: Option<RenderError>,
}

impl<W: EditorWidget, S: ModeStore> ModeCoordinator<W, S> {
    pub fn new(options: EditorOptions, store: S) -> Result<Self, EditorError> {
        let format = formats::by_name(&options.format)?;
        Ok(Self::with_format(format, options, store))
    }

    pub fn with_format(format: Box<dyn Format>, options: EditorOptions, store: S) -> Self {
        ModeCoordinator {
            format,
            widget: None,
            store,
            uploader: Box::new(NoUploader),
            clock: Box::new(SystemClock::default()),
            options,
            attachment_params: Vec::new(),
            source: String::new(),
            mode: Mode::Source,
            generations: Generations::default(),
            image_menu: Vec::new(),
            preview_html: None,
            render_error: None,
        }
    }

    pub fn with_uploader(mut self, uploader: impl AttachmentUploader + 'static) -> Self {
        self.uploader = Box::new(uploader);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Attach the editing widget and enter the persisted mode.
    pub fn attach(&mut self, widget: W) -> Result<Option<PendingRender>, EditorError> {
        self.widget = Some(widget);
        self.refresh_image_menu()?;
        let initial = self.store.get();
        log::debug!("editor attached, initial mode '{initial}'");
        self.change_mode(initial)
    }

    pub fn is_initialized(&self) -> bool {
        self.widget.is_some()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The host's text area changed.
    pub fn set_source(&mut self, text: impl Into<String>) {
        self.source = text.into();
    }

    pub fn format(&self) -> &dyn Format {
        self.format.as_ref()
    }

    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn attachments(&self) -> &AttachmentSet {
        &self.options.attachments
    }

    pub fn set_attachments(&mut self, attachments: AttachmentSet) {
        self.options.attachments = attachments;
    }

    /// Host-defined parameters sent with every render request.
    pub fn set_attachment_params(&mut self, params: Vec<AttachmentParam>) {
        self.attachment_params = params;
    }

    pub fn image_menu(&self) -> &[ImageMenuEntry] {
        &self.image_menu
    }

    /// HTML of the last completed preview render.
    pub fn preview_html(&self) -> Option<&str> {
        self.preview_html.as_deref()
    }

    /// The last render failure, until the next transition or successful render.
    pub fn render_error(&self) -> Option<&RenderError> {
        self.render_error.as_ref()
    }

    /// Switch modes. Returns the render the host has to run, if the target mode needs one.
    pub fn change_mode(&mut self, target: Mode) -> Result<Option<PendingRender>, EditorError> {
        if self.widget.is_none() {
            return Err(EditorError::Uninitialized);
        }
        if self.mode == Mode::RichText {
            self.sync_source()?;
        }

        self.render_error = None;
        self.generations.invalidate();
        let previous = std::mem::replace(&mut self.mode, target);
        log::debug!("mode '{previous}' -> '{target}'");

        let pending = match target {
            Mode::RichText => Some(self.issue_rich_text_render()),
            Mode::Preview => {
                let request = RenderRequest::new(&self.source, self.attachment_params.clone());
                Some(self.issue(Mode::Preview, request))
            }
            Mode::Source => None,
        };
        if target != Mode::Preview {
            self.store.set(target);
        }
        Ok(pending)
    }

    /// [`change_mode`](Self::change_mode) with the render performed synchronously.
    pub fn change_mode_with<R: Renderer>(&mut self, target: Mode, renderer: &R) -> Result<(), EditorError> {
        match self.change_mode(target)? {
            Some(pending) => self.run(pending, renderer),
            None => Ok(()),
        }
    }

    /// Apply a render response. Returns `Ok(false)` when the response is stale and was dropped.
    pub fn complete_render(
        &mut self,
        pending: &PendingRender,
        result: Result<String, RenderError>,
    ) -> Result<bool, EditorError> {
        let current = self.generations.current(pending.target);
        if pending.generation != current {
            log::debug!(
                "dropping stale {} render (generation {}, current {current})",
                pending.target,
                pending.generation,
            );
            return Ok(false);
        }
        let html = match result {
            Ok(html) => html,
            Err(err) => {
                log::warn!("{} render failed: {err}", pending.target);
                self.render_error = Some(err.clone());
                return Err(EditorError::Render(err));
            }
        };
        self.render_error = None;
        match pending.target {
            Mode::RichText => {
                let doc = parse_html(&self.format.unescape(&html));
                self.widget_or_err()?.load(doc);
            }
            Mode::Preview => self.preview_html = Some(html),
            Mode::Source => {}
        }
        Ok(true)
    }

    /// Refresh the image menu and re-render the rich-text view from the source. An outstanding
    /// preview render stays valid.
    pub fn update_visual_content(&mut self) -> Result<PendingRender, EditorError> {
        self.refresh_image_menu()?;
        if self.mode == Mode::RichText {
            self.sync_source()?;
        }
        Ok(self.issue_rich_text_render())
    }

    /// The widget lost focus: in rich-text mode the source is brought up to date.
    pub fn on_focus_lost(&mut self) -> Result<(), EditorError> {
        if self.mode == Mode::RichText {
            self.sync_source()?;
        }
        Ok(())
    }

    /// The widget gained focus: the attachment list may have changed meanwhile.
    pub fn on_focus_gained(&mut self) -> Result<(), EditorError> {
        self.refresh_image_menu()
    }

    pub fn on_paste(&mut self, clipboard: &dyn Clipboard) -> Result<PasteOutcome, EditorError> {
        self.widget_or_err()?;
        match clipboard.kind() {
            PasteKind::Text => Ok(PasteOutcome::Default),
            PasteKind::File | PasteKind::Unknown => Ok(PasteOutcome::Consumed),
            PasteKind::Image => {
                if let Some((data, mime)) = clipboard.image() {
                    let image = PastedImage {
                        name: pasted_image_name(&self.clock.now()),
                        mime,
                        data,
                    };
                    if self.uploader.upload(&image) {
                        self.insert_image(&image.name)?;
                    } else {
                        log::debug!("upload of pasted image '{}' refused", image.name);
                    }
                }
                Ok(PasteOutcome::Consumed)
            }
        }
    }

    /// Drag-over and drop on the widget are always consumed; dropped files would otherwise be
    /// inlined as data URIs.
    pub fn on_drop(&self) -> PasteOutcome {
        PasteOutcome::Consumed
    }

    /// Insert image markup at the caret and re-serialize.
    pub fn insert_image(&mut self, path: &str) -> Result<(), EditorError> {
        let markup = self.format.image_markup(path);
        let fragment = format!("<br>{}<br>", escape_html_text(&markup));
        self.widget_or_err()?.insert_html(&fragment);
        self.sync_source()
    }

    /// An image menu entry was chosen.
    pub fn activate_image_entry(&mut self, entry: &ImageMenuEntry) -> Result<PendingRender, EditorError> {
        self.insert_image(&entry.file)?;
        Ok(self.issue_rich_text_render())
    }

    /// Serialize the widget's tree into the source.
    pub fn sync_source(&mut self) -> Result<(), EditorError> {
        let doc = self.widget_or_err()?.document();
        let context = ConvertContext::new(&self.options.attachments);
        self.source = self.format.serialize(&doc, &context)?;
        Ok(())
    }

    fn refresh_image_menu(&mut self) -> Result<(), EditorError> {
        let entries: Vec<ImageMenuEntry> = self
            .options
            .attachments
            .images(&self.options.image_extensions)
            .map(ImageMenuEntry::new)
            .collect();
        self.widget
            .as_mut()
            .ok_or(EditorError::Uninitialized)?
            .set_image_menu(&entries);
        self.image_menu = entries;
        Ok(())
    }

    fn issue_rich_text_render(&mut self) -> PendingRender {
        let request = RenderRequest::new(&self.format.escape(&self.source), self.attachment_params.clone());
        self.issue(Mode::RichText, request)
    }

    fn issue(&mut self, target: Mode, request: RenderRequest) -> PendingRender {
        let generation = self.generations.bump(target);
        log::debug!("issuing {target} render, generation {generation}");
        PendingRender {
            generation,
            target,
            request,
        }
    }

    fn run<R: Renderer>(&mut self, pending: PendingRender, renderer: &R) -> Result<(), EditorError> {
        let result = renderer.render(&pending.request);
        self.complete_render(&pending, result).map(|_| ())
    }

    fn widget_or_err(&mut self) -> Result<&mut W, EditorError> {
        self.widget.as_mut().ok_or(EditorError::Uninitialized)
    }
}

/// Render generations per view. Source mode renders nothing and stays at zero.
#[derive(Debug, Default, Clone, Copy)]
struct Generations {
    rich_text: u64,
    preview: u64,
}

impl Generations {
    fn invalidate(&mut self) {
        self.rich_text += 1;
        self.preview += 1;
    }

    fn bump(&mut self, target: Mode) -> u64 {
        match target {
            Mode::RichText => {
                self.rich_text += 1;
                self.rich_text
            }
            Mode::Preview => {
                self.preview += 1;
                self.preview
            }
            Mode::Source => 0,
        }
    }

    fn current(&self, target: Mode) -> u64 {
        match target {
            Mode::RichText => self.rich_text,
            Mode::Preview => self.preview,
            Mode::Source => 0,
        }
    }
}

fn escape_html_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
