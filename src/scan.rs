//! Content tree scanning and manifest construction.
//!
//! Walks the fixed four-level hierarchy under the content root and produces a
//! [`Manifest`] describing it. The walk is read-only and goes through a
//! [`ContentSource`], so tests can run it against an in-memory tree.
//!
//! ## Directory Structure
//!
//! ```text
//! usii/                                # Content root
//! ├── 01_colonial_america/             # Unit
//! │   ├── icon.png                     # Unit icon (optional)
//! │   └── 01_jamestown/                # Lesson
//! │       ├── icon.svg                 # Lesson icon (optional)
//! │       └── overview/                # Tab
//! │           ├── bgimage.jpg          # Tab icon fallback (optional)
//! │           └── 01_the_fort/         # Card
//! │               ├── bgimage.png      # Card background (optional)
//! │               ├── writing          # Marks the card as having text
//! │               ├── fort.jpg         # Media
//! │               ├── fort.caption     # Caption for fort.jpg
//! │               └── tour.mp4         # Media (video)
//! └── 02_revolution/
//!     └── ...
//! ```
//!
//! Only directories count at the unit, lesson, tab and card levels; stray
//! files there are ignored. Files only matter inside cards (media, captions,
//! `writing`) and as icon/background candidates.
//!
//! ## Ordering
//!
//! Siblings are sorted by directory name (byte order) at every level, so the
//! numeric prefixes authors use (`01_`, `02_`) give the intended order and the
//! manifest is identical across platforms.
//!
//! ## Failure Handling
//!
//! The content root must be listable; anything below it that cannot be
//! listed is treated as empty and the walk moves on. Missing icons,
//! backgrounds and captions are `null`, never errors.

use crate::media::{self, BACKGROUND_CANDIDATES, ICON_CANDIDATES};
use crate::naming::derive_title;
use crate::source::{ContentSource, DiskSource, Entry};
use crate::types::{Card, Lesson, Manifest, Media, Tab, Unit};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the entry whose presence marks a card as having written content.
pub const WRITING_ENTRY: &str = "writing";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read content root {path}: {source}")]
    ContentRoot {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Scan a content root on disk, stamping the manifest with the current time.
///
/// `path_prefix` is prepended to every icon and background path; it is
/// normally the content directory's own name (see [`default_path_prefix`]).
pub fn scan(root: &Path, path_prefix: &str) -> Result<Manifest, ScanError> {
    build_manifest(&DiskSource, root, path_prefix, Utc::now())
}

/// Build a manifest from any [`ContentSource`].
pub fn build_manifest(
    source: &impl ContentSource,
    root: &Path,
    path_prefix: &str,
    generated_at: DateTime<Utc>,
) -> Result<Manifest, ScanError> {
    let entries = source
        .read_dir(root)
        .map_err(|source| ScanError::ContentRoot {
            path: root.to_path_buf(),
            source,
        })?;

    let walker = Walker {
        source,
        prefix: path_prefix,
    };

    let units = sorted_dirs(entries)
        .into_iter()
        .map(|unit| walker.unit(&root.join(&unit.name), &unit.name))
        .collect();

    Ok(Manifest {
        generated_at: format_timestamp(generated_at),
        units,
    })
}

/// Format a timestamp the way the manifest stores it: `2024-09-01T12:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Default path prefix for a content root: its final path component.
///
/// Falls back to the canonicalized directory name for roots like `.`, and to
/// an empty prefix when no name can be determined (e.g. `/`).
pub fn default_path_prefix(root: &Path) -> String {
    let name = root
        .file_name()
        .map(|n| n.to_os_string())
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_os_string()))
        });
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Holds what every level of the walk needs.
struct Walker<'a, S> {
    source: &'a S,
    prefix: &'a str,
}

impl<S: ContentSource> Walker<'_, S> {
    fn unit(&self, dir: &Path, name: &str) -> Unit {
        let segments = [name];
        Unit {
            name: name.to_string(),
            title: derive_title(name),
            icon: self.icon(dir, &segments),
            lessons: self
                .subdirs(dir)
                .into_iter()
                .map(|lesson| {
                    self.lesson(&dir.join(&lesson.name), &[name, lesson.name.as_str()])
                })
                .collect(),
        }
    }

    fn lesson(&self, dir: &Path, segments: &[&str; 2]) -> Lesson {
        let name = segments[1];
        Lesson {
            name: name.to_string(),
            title: derive_title(name),
            icon: self.icon(dir, segments),
            tabs: self
                .subdirs(dir)
                .into_iter()
                .map(|tab| {
                    self.tab(
                        &dir.join(&tab.name),
                        &[segments[0], segments[1], tab.name.as_str()],
                    )
                })
                .collect(),
        }
    }

    fn tab(&self, dir: &Path, segments: &[&str; 3]) -> Tab {
        let name = segments[2];
        Tab {
            name: name.to_string(),
            title: derive_title(name),
            icon: self.icon(dir, segments),
            cards: self
                .subdirs(dir)
                .into_iter()
                .map(|card| {
                    self.card(
                        &dir.join(&card.name),
                        &[segments[0], segments[1], segments[2], card.name.as_str()],
                    )
                })
                .collect(),
        }
    }

    fn card(&self, dir: &Path, segments: &[&str; 4]) -> Card {
        let name = segments[3];
        let bgimage = media::find_first(self.source, dir, BACKGROUND_CANDIDATES)
            .map(|file| self.asset_path(segments, file));

        let media_items = self
            .list(dir)
            .into_iter()
            .filter(media::is_media)
            .map(|entry| Media {
                media_type: media::classify(&entry.name),
                caption: media::read_caption(self.source, dir, &entry.name),
                name: entry.name,
            })
            .collect();

        Card {
            name: name.to_string(),
            title: derive_title(name),
            bgimage,
            has_writing: self.source.exists(&dir.join(WRITING_ENTRY)),
            media: media_items,
        }
    }

    fn icon(&self, dir: &Path, segments: &[&str]) -> Option<String> {
        media::find_first(self.source, dir, ICON_CANDIDATES)
            .map(|file| self.asset_path(segments, file))
    }

    /// `/`-joined path from the prefix through `segments` to `file`.
    fn asset_path(&self, segments: &[&str], file: &str) -> String {
        std::iter::once(self.prefix)
            .chain(segments.iter().copied())
            .chain(std::iter::once(file))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn subdirs(&self, dir: &Path) -> Vec<Entry> {
        sorted_dirs(self.list(dir))
    }

    /// Sorted listing of `dir`; unreadable directories list as empty.
    fn list(&self, dir: &Path) -> Vec<Entry> {
        match self.source.read_dir(dir) {
            Ok(mut entries) => {
                entries.sort_by(|a, b| a.name.cmp(&b.name));
                entries
            }
            Err(err) => {
                debug!(path = %dir.display(), %err, "directory unreadable, treating as empty");
                Vec::new()
            }
        }
    }
}

fn sorted_dirs(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.retain(Entry::is_dir);
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
