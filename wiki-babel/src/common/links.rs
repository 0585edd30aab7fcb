//! Links, images and attachments.
//!
//! - [`AttachmentSet`]: the filenames uploaded for the current document, supplied by the host.
//! - [`resolve_image_url`]: Image Reference Resolver. A URL pointing at the host's own
//!   attachment download path is written back as the bare filename, but only when that filename
//!   really is one of the known attachments; anything else stays an absolute URL.
//! - [`is_autolink`]: anchors whose text is their own URL are written as bare text, the renderer
//!   links them again on its own.

use crate::dom::Element;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Extensions offered in the image insertion menu.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

static DOWNLOAD_DIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/attachments/download/[1-9][0-9]*$").expect("valid regex"));

const AUTOLINK_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

/// Ordered list of attachment filenames known for the current document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttachmentSet {
    files: Vec<String>,
}

impl AttachmentSet {
    pub fn new(files: Vec<String>) -> Self {
        AttachmentSet { files }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|f| f == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Filenames with one of the given image extensions (case-insensitive), in order.
    pub fn images<'a>(&'a self, extensions: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        self.iter()
            .filter(move |name| has_extension(name, extensions))
    }
}

impl From<Vec<String>> for AttachmentSet {
    fn from(files: Vec<String>) -> Self {
        AttachmentSet::new(files)
    }
}

impl<S: Into<String>> FromIterator<S> for AttachmentSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        AttachmentSet::new(iter.into_iter().map(Into::into).collect())
    }
}

pub fn has_extension(name: &str, extensions: &[String]) -> bool {
    name.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty() && extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    })
}

/// Resolve an image or link URL to the reference written into markup.
pub fn resolve_image_url(url: &str, attachments: &AttachmentSet) -> String {
    let Some((dir, filename)) = url.rsplit_once('/') else {
        return url.to_string();
    };
    if DOWNLOAD_DIR_RE.is_match(dir) && attachments.contains(filename) {
        filename.to_string()
    } else {
        url.to_string()
    }
}

/// An anchor is an autolink when its text equals its `mailto:` target, or equals its
/// http/https/ftp/ftps target with at most one trailing slash dropped.
pub fn is_autolink(anchor: &Element) -> bool {
    if !anchor.is("a") {
        return false;
    }
    let Some(href) = anchor.attr("href") else {
        return false;
    };
    let text = anchor.text_content();

    if href.strip_prefix("mailto:") == Some(text.as_str()) {
        return true;
    }

    let web_scheme = Url::parse(href)
        .map(|url| AUTOLINK_SCHEMES.contains(&url.scheme()))
        .unwrap_or(false);
    web_scheme && (href == text || href.strip_suffix('/') == Some(text.as_str()))
}
