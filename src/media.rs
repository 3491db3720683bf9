//! Convention-based file discovery inside content directories.
//!
//! Three lookups share the "the filesystem is the data source" rule:
//!
//! ## Icons and backgrounds
//!
//! Units, lessons and tabs carry an icon; cards carry a background image.
//! Both are found by probing a fixed list of filenames in priority order and
//! taking the first that exists:
//!
//! ```text
//! icon:       icon.png → icon.svg → icon.jpg → icon.jpeg
//!             → bgimage.png → bgimage.jpg → bgimage.jpeg
//! background: bgimage.png → bgimage.jpg → bgimage.jpeg
//! ```
//!
//! SVG is accepted as an icon but never as a card background.
//!
//! ## Media
//!
//! Any file in a card whose extension is `png`, `jpg`, `jpeg`, `mp4` or `svg`
//! (any case) is a media item, unless it is named `bgimage.*`. `mp4` files are
//! videos; everything else is an image.
//!
//! ## Captions
//!
//! A media item's caption is the trimmed text of `<stem>.caption` next to it:
//! `photo.jpg` → `photo.caption`. Missing or unreadable caption files mean no
//! caption.

use crate::source::{ContentSource, Entry};
use crate::types::MediaType;
use std::path::Path;
use tracing::debug;

/// Icon lookup order for units, lessons and tabs.
pub const ICON_CANDIDATES: &[&str] = &[
    "icon.png",
    "icon.svg",
    "icon.jpg",
    "icon.jpeg",
    "bgimage.png",
    "bgimage.jpg",
    "bgimage.jpeg",
];

/// Background lookup order for cards.
pub const BACKGROUND_CANDIDATES: &[&str] = &["bgimage.png", "bgimage.jpg", "bgimage.jpeg"];

const MEDIA_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "mp4", "svg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4"];
const CAPTION_SUFFIX: &str = "caption";
const BACKGROUND_PREFIX: &str = "bgimage.";

/// Return the first candidate that exists in `dir`.
///
/// A missing `dir` behaves like a directory with none of the candidates.
pub fn find_first<'a>(
    source: &impl ContentSource,
    dir: &Path,
    candidates: &[&'a str],
) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|name| source.exists(&dir.join(name)))
}

/// Lowercased extension of a filename, if any.
///
/// Uses the text after the last dot, so `archive.tar.mp4` → `mp4`. A name
/// that is only a dot and an extension (`.mp4`) counts too.
fn extension(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Whether a filename follows the `bgimage.*` background naming pattern.
pub fn is_background_name(name: &str) -> bool {
    name.get(..BACKGROUND_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(BACKGROUND_PREFIX))
}

/// Whether a card file should be listed as a media item.
pub fn is_media(entry: &Entry) -> bool {
    if !entry.is_file() || is_background_name(&entry.name) {
        return false;
    }
    extension(&entry.name).is_some_and(|ext| MEDIA_EXTENSIONS.contains(&ext.as_str()))
}

/// Classify a media filename by extension.
pub fn classify(name: &str) -> MediaType {
    match extension(name) {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaType::Video,
        _ => MediaType::Image,
    }
}

/// Read the caption paired with a media file in `dir`.
///
/// Looks for `<stem>.caption`, where the stem is the filename with its last
/// extension removed. The returned text is trimmed; a caption file that is
/// empty after trimming counts as no caption.
pub fn read_caption(source: &impl ContentSource, dir: &Path, media_name: &str) -> Option<String> {
    let stem = Path::new(media_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| media_name.to_string());
    let caption_path = dir.join(format!("{stem}.{CAPTION_SUFFIX}"));
    if !source.exists(&caption_path) {
        return None;
    }
    match source.read_to_string(&caption_path) {
        Ok(text) => Some(text.trim().to_string()).filter(|s| !s.is_empty()),
        Err(err) => {
            debug!(path = %caption_path.display(), %err, "caption unreadable, skipping");
            None
        }
    }
}
