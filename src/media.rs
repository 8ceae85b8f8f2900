//! Photo source resolution.
//!
//! Photos may point at a plain image URL or at a Google Drive sharing link.
//! Drive sharing links render an HTML viewer, not an image, so they are
//! rewritten to Drive's direct endpoints using the extracted file id:
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | [`resolve`] | `https://drive.google.com/uc?export=view&id=<id>` |
//! | [`resolve_download`] | `https://drive.google.com/uc?export=download&id=<id>` |
//! | [`resolve_thumbnail`] | `https://drive.google.com/thumbnail?id=<id>&sz=w<size>` |
//!
//! Anything that is not a Drive link, or a Drive link without a recognizable
//! id, is returned unchanged. None of these functions fail.
//!
//! The view endpoint is unreliable for large files; the thumbnail endpoint
//! usually works when it doesn't. [`ImageSource`] pairs the two so the
//! consumer can swap to the thumbnail exactly once on a load error.

/// Max width requested from the thumbnail endpoint unless configured otherwise.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 2000;

const DRIVE_HOST: &str = "drive.google.com";

/// Extract a Drive file id from a sharing link.
///
/// Recognizes `/file/d/<id>/...` first, then an `id=<id>` query parameter.
/// Matching is case-insensitive; the id keeps its original case.
pub fn extract_drive_file_id(input: &str) -> Option<&str> {
    let src = input.trim();
    let lower = src.to_ascii_lowercase();
    if !lower.contains(DRIVE_HOST) {
        return None;
    }

    if let Some(pos) = lower.find("/file/d/") {
        let rest = &src[pos + "/file/d/".len()..];
        let id = take_until(rest, &['/', '?', '#']);
        if !id.is_empty() {
            return Some(id);
        }
    }

    ["?id=", "&id="]
        .iter()
        .filter_map(|needle| lower.find(needle).map(|pos| pos + needle.len()))
        .min()
        .map(|start| take_until(&src[start..], &['&', '#']))
        .filter(|id| !id.is_empty())
}

fn take_until<'a>(s: &'a str, stops: &[char]) -> &'a str {
    match s.find(stops) {
        Some(end) => &s[..end],
        None => s,
    }
}

pub fn drive_view_url(id: &str) -> String {
    format!("https://drive.google.com/uc?export=view&id={id}")
}

pub fn drive_download_url(id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={id}")
}

pub fn drive_thumbnail_url(id: &str, size: u32) -> String {
    format!("https://drive.google.com/thumbnail?id={id}&sz=w{size}")
}

/// Renderable image URL for a raw source.
pub fn resolve(src: &str) -> String {
    match extract_drive_file_id(src) {
        Some(id) => drive_view_url(id),
        None => src.to_string(),
    }
}

/// Download-flavored URL for a raw source.
pub fn resolve_download(src: &str) -> String {
    match extract_drive_file_id(src) {
        Some(id) => drive_download_url(id),
        None => src.to_string(),
    }
}

/// Thumbnail-flavored URL with `size` as the max width.
pub fn resolve_thumbnail(src: &str, size: u32) -> String {
    match extract_drive_file_id(src) {
        Some(id) => drive_thumbnail_url(id, size),
        None => src.to_string(),
    }
}

/// Everything an `<img>` needs for one photo, plus the one-shot fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    /// URL to load first.
    pub src: String,
    /// URL to swap to on the first load error. `None` when it would be the
    /// same URL as `src`, i.e. there is nothing to fall back to.
    pub fallback: Option<String>,
    /// Download link.
    pub download: String,
    fallback_applied: bool,
}

impl ImageSource {
    pub fn new(raw: &str, thumbnail_size: u32) -> Self {
        let src = resolve(raw);
        let thumb = resolve_thumbnail(raw, thumbnail_size);
        Self {
            fallback: (thumb != src).then_some(thumb),
            src,
            download: resolve_download(raw),
            fallback_applied: false,
        }
    }

    /// Handle a load error on the current `src`.
    ///
    /// Returns the URL to swap to on the first call only; later errors give up.
    pub fn on_error(&mut self) -> Option<&str> {
        if self.fallback_applied {
            return None;
        }
        self.fallback_applied = true;
        let fallback = self.fallback.as_deref()?;
        self.src = fallback.to_string();
        Some(fallback)
    }

    pub fn fallback_applied(&self) -> bool {
        self.fallback_applied
    }
}
