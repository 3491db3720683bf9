//! Read-only filesystem access for the manifest walk.
//!
//! The [`ContentSource`] trait is the only way [`scan`](crate::scan) touches
//! the filesystem. The production implementation is [`DiskSource`]; tests use
//! an in-memory fake so tree shapes can be described without a temp dir.

use std::io;
use std::path::Path;

/// Kind of a directory entry, as reported by the listing itself.
///
/// Symlinks are reported as [`EntryKind::Other`], matching what a plain
/// `read_dir` file type says without following the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Other,
}

/// A single entry from a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Filesystem capability needed to build a manifest.
pub trait ContentSource {
    /// List the immediate entries of a directory, in whatever order the
    /// underlying listing returns them.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<Entry>>;

    /// Whether anything (file, directory, link) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`ContentSource`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSource;

impl ContentSource for DiskSource {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        // Follows symlinks: a dangling link does not exist.
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
