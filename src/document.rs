//! Master document builder.
//!
//! Concatenates every card's writing and images into one HTML file for PDF
//! export. Unlike the manifest walk this does not assume the four fixed
//! levels: any directory holding a `writing` entry is a card, and every
//! other directory becomes a heading.
//!
//! ## Output Structure
//!
//! ```text
//! <h1>01 colonial america</h1>              # depth 1
//! <h2>01 jamestown</h2>                     # depth 2
//! <h3>overview</h3>                         # depth 3
//! <h5>Card: 01 the fort</h5>                # card, any depth
//! <p>escaped writing text</p>
//! <img src="01_colonial_america/.../fort.jpg" ...><br>
//! <p>[Video: tour.mp4]</p>
//! ```
//!
//! Branch headings are clamped to `max_heading_level`, so a directory seven
//! levels down renders the same as one at the cap. Files sitting in branch
//! directories are ignored.
//!
//! The walk is pre-order with siblings sorted by file name. The file is
//! written unconditionally.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::DocumentConfig;
use crate::naming::heading_name;
use crate::scan::WRITING_ENTRY;

/// Extensions inlined as `<img>`.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Extensions rendered as a `[Video: name]` placeholder.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm"];

const CSS: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.4; margin: 40px; }
h1, h2, h3, h4, h5, h6 { color: #2c3e50; }
img { display: block; margin: 10px 0; max-width: 100%; }
p { margin: 5px 0; }
";

const IMG_STYLE: &str = "max-width: 100%; margin: 10px 0;";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot read content root {path}: {source}")]
    ContentRoot {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A rendered master document and what went into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterDocument {
    pub html: String,
    /// Branch headings emitted
    pub sections: usize,
    pub cards: usize,
    pub images: usize,
    pub videos: usize,
}

/// Walk `root` and render the master document.
///
/// Only an unreadable root is fatal. Entries the walk cannot read are
/// skipped with a warning.
pub fn build_document(root: &Path, config: &DocumentConfig) -> Result<MasterDocument, DocumentError> {
    fs::read_dir(root).map_err(|source| DocumentError::ContentRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let mut doc = MasterDocument::default();
    let mut body = String::new();
    let mut it = WalkDir::new(root).min_depth(1).sort_by_file_name().into_iter();

    while let Some(entry) = it.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let name = entry.file_name().to_string_lossy();

        if dir.join(WRITING_ENTRY).exists() {
            body.push_str(&render_card(root, dir, &name, &mut doc).into_string());
            it.skip_current_dir();
        } else {
            let level = entry.depth().min(usize::from(config.max_heading_level));
            body.push_str(&render_heading(level, &heading_name(&name)).into_string());
            doc.sections += 1;
        }
        body.push('\n');
    }

    doc.html = base_document(&config.title, PreEscaped(body)).into_string();
    Ok(doc)
}

/// Write the document, creating parent directories as needed.
pub fn write_document(path: &Path, html: &str) -> Result<(), DocumentError> {
    let io_err = |source: std::io::Error| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, html).map_err(io_err)
}

/// Escape `&`, `<` and `>`. Quotes are left alone.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                "\n"
                (content)
            }
        }
    }
}

fn render_heading(level: usize, text: &str) -> Markup {
    match level {
        0 | 1 => html! { h1 { (text) } },
        2 => html! { h2 { (text) } },
        3 => html! { h3 { (text) } },
        4 => html! { h4 { (text) } },
        5 => html! { h5 { (text) } },
        _ => html! { h6 { (text) } },
    }
}

fn render_card(root: &Path, dir: &Path, name: &str, doc: &mut MasterDocument) -> Markup {
    doc.cards += 1;

    let writing_path = dir.join(WRITING_ENTRY);
    // Invalid UTF-8 is replaced, not dropped; only I/O failures lose the text.
    let writing = match fs::read(&writing_path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            debug!(path = %writing_path.display(), error = %e, "writing unreadable");
            String::new()
        }
    };

    let files = card_files(dir);
    let images: Vec<String> = files
        .iter()
        .filter(|f| has_extension(f, IMAGE_EXTENSIONS))
        .map(|f| relative_url(root, &dir.join(f)))
        .collect();
    let videos: Vec<&str> = files
        .iter()
        .map(String::as_str)
        .filter(|f| has_extension(f, VIDEO_EXTENSIONS))
        .collect();
    doc.images += images.len();
    doc.videos += videos.len();

    html! {
        h5 { "Card: " (heading_name(name)) }
        "\n"
        p { (PreEscaped(escape_text(&writing))) }
        "\n"
        @for src in &images {
            img src=(src) style=(IMG_STYLE);
            br;
            "\n"
        }
        @for video in &videos {
            p { "[Video: " (video) "]" }
            "\n"
        }
    }
}

/// File names directly inside a card directory, sorted.
fn card_files(dir: &Path) -> Vec<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "card entry unreadable");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect()
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e.to_ascii_lowercase().as_str()))
}

/// Path of `path` relative to `root`, joined with `/`.
fn relative_url(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
