//! Shared test utilities for the coursegen test suite.
//!
//! Provides an in-memory [`ContentSource`], fixture setup, and lookup helpers
//! over the manifest tree.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fs = MemorySource::new()
//!     .file("usii/01_colonies/icon.png", "")
//!     .file("usii/01_colonies/01_jamestown/overview/fort/writing", "Text");
//! let manifest = build_manifest(&fs, Path::new("usii"), "usii", Utc::now()).unwrap();
//!
//! let unit = find_unit(&manifest, "01_colonies");
//! assert_eq!(unit.icon.as_deref(), Some("usii/01_colonies/icon.png"));
//! ```

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::source::{ContentSource, Entry, EntryKind};
use crate::types::{Card, Lesson, Manifest, Media, Tab, Unit};

// =========================================================================
// In-memory filesystem
// =========================================================================

#[derive(Debug, Clone)]
enum Node {
    Dir,
    UnreadableDir,
    File(String),
    UnreadableFile,
}

/// In-memory [`ContentSource`].
///
/// Paths are relative, `/`-separated, and parents are created implicitly.
/// Listings come back in insertion order, which lets tests check that the
/// walk does its own sorting.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    nodes: Vec<(PathBuf, Node)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and its parents).
    pub fn dir(mut self, path: &str) -> Self {
        self.insert(Path::new(path), Node::Dir);
        self
    }

    /// Add a readable text file (and its parent directories).
    pub fn file(mut self, path: &str, contents: &str) -> Self {
        self.insert(Path::new(path), Node::File(contents.to_string()));
        self
    }

    /// Add a directory that exists but fails to list.
    pub fn unreadable_dir(mut self, path: &str) -> Self {
        self.insert(Path::new(path), Node::UnreadableDir);
        self
    }

    /// Add a file that exists but fails to read.
    pub fn unreadable_file(mut self, path: &str) -> Self {
        self.insert(Path::new(path), Node::UnreadableFile);
        self
    }

    fn insert(&mut self, path: &Path, node: Node) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && self.get(parent).is_none()
        {
            self.insert(parent, Node::Dir);
        }
        match self.nodes.iter_mut().find(|(p, _)| p == path) {
            Some((_, existing)) => *existing = node,
            None => self.nodes.push((path.to_path_buf(), node)),
        }
    }

    fn get(&self, path: &Path) -> Option<&Node> {
        self.nodes.iter().find(|(p, _)| p == path).map(|(_, n)| n)
    }
}

impl ContentSource for MemorySource {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<Entry>> {
        match self.get(path) {
            Some(Node::Dir) => {}
            Some(Node::UnreadableDir) => {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            Some(_) => return Err(io::Error::other("not a directory")),
            None => return Err(io::Error::from(io::ErrorKind::NotFound)),
        }
        Ok(self
            .nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, node)| Entry {
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                kind: match node {
                    Node::Dir | Node::UnreadableDir => EntryKind::Dir,
                    Node::File(_) | Node::UnreadableFile => EntryKind::File,
                },
            })
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.get(path) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            Some(Node::UnreadableFile) => {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
            Some(_) => Err(io::Error::other("is a directory")),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/` to a temp directory and return it.
///
/// The content root is `<tmp>/usii`. Tests get an isolated copy they can
/// mutate without affecting other tests or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups (panic with the available names on a miss)
// =========================================================================

/// Find a unit by directory name. Panics if not found.
pub fn find_unit<'a>(manifest: &'a Manifest, name: &str) -> &'a Unit {
    manifest
        .units
        .iter()
        .find(|u| u.name == name)
        .unwrap_or_else(|| panic!("unit '{name}' not found. Available: {:?}", unit_names(manifest)))
}

/// Find a lesson by directory name. Panics if not found.
pub fn find_lesson<'a>(unit: &'a Unit, name: &str) -> &'a Lesson {
    unit.lessons.iter().find(|l| l.name == name).unwrap_or_else(|| {
        let names: Vec<&str> = unit.lessons.iter().map(|l| l.name.as_str()).collect();
        panic!("lesson '{name}' not found in '{}'. Available: {names:?}", unit.name)
    })
}

/// Find a tab by directory name. Panics if not found.
pub fn find_tab<'a>(lesson: &'a Lesson, name: &str) -> &'a Tab {
    lesson.tabs.iter().find(|t| t.name == name).unwrap_or_else(|| {
        let names: Vec<&str> = lesson.tabs.iter().map(|t| t.name.as_str()).collect();
        panic!("tab '{name}' not found in '{}'. Available: {names:?}", lesson.name)
    })
}

/// Find a card by directory name. Panics if not found.
pub fn find_card<'a>(tab: &'a Tab, name: &str) -> &'a Card {
    tab.cards.iter().find(|c| c.name == name).unwrap_or_else(|| {
        let names: Vec<&str> = tab.cards.iter().map(|c| c.name.as_str()).collect();
        panic!("card '{name}' not found in '{}'. Available: {names:?}", tab.name)
    })
}

/// Find a media item by filename. Panics if not found.
pub fn find_media<'a>(card: &'a Card, name: &str) -> &'a Media {
    card.media
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| {
            panic!(
                "media '{name}' not found in card '{}'. Available: {:?}",
                card.name,
                media_names(card)
            )
        })
}

/// The single card in a manifest. Panics unless there is exactly one.
pub fn only_card(manifest: &Manifest) -> &Card {
    let cards: Vec<&Card> = manifest
        .units
        .iter()
        .flat_map(|u| &u.lessons)
        .flat_map(|l| &l.tabs)
        .flat_map(|t| &t.cards)
        .collect();
    assert_eq!(cards.len(), 1, "expected exactly one card, found {}", cards.len());
    cards[0]
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All unit names in manifest order.
pub fn unit_names(manifest: &Manifest) -> Vec<&str> {
    manifest.units.iter().map(|u| u.name.as_str()).collect()
}

/// All media filenames in card order.
pub fn media_names(card: &Card) -> Vec<&str> {
    card.media.iter().map(|m| m.name.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_creates_parents() {
        let fs = MemorySource::new().file("a/b/c.txt", "x");
        assert!(fs.exists(Path::new("a")));
        assert!(fs.exists(Path::new("a/b")));
        assert_eq!(fs.read_dir(Path::new("a")).unwrap()[0].name, "b");
    }

    #[test]
    fn memory_source_lists_in_insertion_order() {
        let fs = MemorySource::new().dir("r/z").dir("r/a");
        let names: Vec<String> = fs
            .read_dir(Path::new("r"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn memory_source_errors() {
        let fs = MemorySource::new()
            .unreadable_dir("locked")
            .unreadable_file("secret.caption");
        assert!(fs.read_dir(Path::new("locked")).is_err());
        assert!(fs.read_dir(Path::new("missing")).is_err());
        assert!(fs.read_to_string(Path::new("secret.caption")).is_err());
        assert!(fs.exists(Path::new("locked")));
    }
}
