//! Paste handling
//!
//! Clipboard APIs differ between platforms, so the coordinator only asks a [`Clipboard`] what
//! kind of content it holds. Images are uploaded as attachments under a timestamped name and
//! inserted as image markup; file pastes and content that cannot be identified are swallowed;
//! text goes through the widget's normal paste.

use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteKind {
    Image,
    File,
    Text,
    /// The platform cannot tell; treated like a file paste.
    Unknown,
}

/// What the host should do with the paste event afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Stop propagation and prevent the default paste.
    Consumed,
    /// Let the widget paste as usual.
    Default,
}

pub trait Clipboard {
    fn kind(&self) -> PasteKind;

    /// Image bytes and MIME type, when the platform can materialize them.
    fn image(&self) -> Option<(Vec<u8>, String)>;
}

/// One item of a standard clipboard data transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub mime: String,
    pub data: Option<Vec<u8>>,
}

/// Clipboard exposing transfer types and items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardClipboard {
    pub types: Vec<String>,
    pub items: Vec<ClipboardItem>,
}

impl Clipboard for StandardClipboard {
    /// A lone `Files` type whose first item is an image is an image; no types at all is a file.
    fn kind(&self) -> PasteKind {
        let single_file = self.types.len() == 1 && self.types[0] == "Files";
        let image_item = self
            .items
            .first()
            .is_some_and(|item| item.mime.contains("image"));
        if single_file && image_item {
            PasteKind::Image
        } else if self.types.is_empty() {
            PasteKind::File
        } else {
            PasteKind::Text
        }
    }

    fn image(&self) -> Option<(Vec<u8>, String)> {
        let item = self.items.first()?;
        item.data.clone().map(|data| (data, item.mime.clone()))
    }
}

/// Clipboard that only answers "give me the text".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyClipboard {
    pub text: Option<String>,
}

impl Clipboard for LegacyClipboard {
    fn kind(&self) -> PasteKind {
        match self.text {
            Some(_) => PasteKind::Text,
            None => PasteKind::Unknown,
        }
    }

    fn image(&self) -> Option<(Vec<u8>, String)> {
        None
    }
}

/// File-like object handed to the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastedImage {
    pub name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

/// Host upload mechanism. Returns whether the file was accepted.
pub trait AttachmentUploader {
    fn upload(&mut self, image: &PastedImage) -> bool;
}

/// Uploader used until the host provides one: refuses everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoUploader;

impl AttachmentUploader for NoUploader {
    fn upload(&mut self, _image: &PastedImage) -> bool {
        false
    }
}

/// Broken-down wall-clock time, millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl Timestamp {
    /// The time at `millis` shifted by `offset_minutes` east of UTC.
    pub fn from_unix_millis_at_offset(millis: i64, offset_minutes: i32) -> Self {
        Self::from_unix_millis(millis + i64::from(offset_minutes) * 60_000)
    }

    pub fn from_unix_millis(millis: i64) -> Self {
        let days = millis.div_euclid(86_400_000);
        let of_day = millis.rem_euclid(86_400_000);
        let (year, month, day) = civil_from_days(days);
        Timestamp {
            year,
            month,
            day,
            hour: (of_day / 3_600_000) as u32,
            minute: (of_day / 60_000 % 60) as u32,
            second: (of_day / 1000 % 60) as u32,
            millisecond: (of_day % 1000) as u32,
        }
    }
}

/// Days since 1970-01-01 to (year, month, day) in the proleptic Gregorian calendar.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Pasted images are named after the user's local time. The standard library has no time
/// zone database, so the host passes its UTC offset; the default clock reads UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock {
    utc_offset_minutes: i32,
}

impl SystemClock {
    pub fn with_utc_offset(minutes: i32) -> Self {
        SystemClock {
            utc_offset_minutes: minutes,
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or_default();
        Timestamp::from_unix_millis_at_offset(millis, self.utc_offset_minutes)
    }
}

/// `YYYYMMDD-HHMMSS-mmm.png`
pub fn pasted_image_name(at: &Timestamp) -> String {
    format!(
        "{:04}{:02}{:02}-{:02}{:02}{:02}-{:03}.png",
        at.year, at.month, at.day, at.hour, at.minute, at.second, at.millisecond
    )
}
