//! CLI output formatting for the manifest and document commands.
//!
//! # Information-First Display
//!
//! Every entity (unit, lesson, tab, card) leads with its positional index and
//! derived title. Directory names and file details are secondary context on
//! indented lines, so the output reads as a content inventory while still
//! pointing back at the files on disk.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Units
//! 001 Colonial America
//!     Source: 01_colonial_america/
//!     Icon: usii/01_colonial_america/icon.png
//!     001 Jamestown
//!         Source: 01_jamestown/
//!         001 Overview
//!             Source: overview/
//!             001 The Fort (2 media, writing)
//!                 Source: 01_the_fort/
//!                 Background: usii/01_colonial_america/.../bgimage.jpg
//!                 001 fort.jpg (image): The reconstructed palisade.
//!                 002 tour.mp4 (video)
//!
//! Found 2 units, 3 lessons, 3 tabs, 4 cards
//! ```
//!
//! ## Manifest / Document
//!
//! ```text
//! Manifest → usii/manifest.json (unchanged)
//! Document → master.html (8 sections, 4 cards, 3 images, 1 video)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::document::MasterDocument;
use crate::types::{Card, Manifest, MediaType};
use crate::write::WriteOutcome;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line plus `Source:` context line for a directory entity.
fn entity_lines(depth: usize, index: usize, title: &str, name: &str) -> [String; 2] {
    [
        format!("{}{} {}", indent(depth), format_index(index), title),
        format!("{}    Source: {}/", indent(depth), name),
    ]
}

/// Card detail in parentheses: `(2 media, writing)`, `(no media)`.
fn card_detail(card: &Card) -> String {
    let media = match card.media.len() {
        0 => "no media".to_string(),
        n => format!("{} media", n),
    };
    if card.has_writing {
        format!("({}, writing)", media)
    } else {
        format!("({})", media)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

// ============================================================================
// Check: scanned tree
// ============================================================================

/// Format the scanned content tree.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Units".to_string()];
    let (mut lessons, mut tabs) = (0, 0);

    for (u, unit) in manifest.units.iter().enumerate() {
        lines.extend(entity_lines(0, u + 1, &unit.title, &unit.name));
        if let Some(ref icon) = unit.icon {
            lines.push(format!("    Icon: {}", icon));
        }

        for (l, lesson) in unit.lessons.iter().enumerate() {
            lessons += 1;
            lines.extend(entity_lines(1, l + 1, &lesson.title, &lesson.name));
            if let Some(ref icon) = lesson.icon {
                lines.push(format!("        Icon: {}", icon));
            }

            for (t, tab) in lesson.tabs.iter().enumerate() {
                tabs += 1;
                lines.extend(entity_lines(2, t + 1, &tab.title, &tab.name));
                if let Some(ref icon) = tab.icon {
                    lines.push(format!("            Icon: {}", icon));
                }

                for (c, card) in tab.cards.iter().enumerate() {
                    format_card(&mut lines, c + 1, card);
                }
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Found {}, {}, {}, {}",
        plural(manifest.units.len(), "unit"),
        plural(lessons, "lesson"),
        plural(tabs, "tab"),
        plural(manifest.card_count(), "card"),
    ));
    lines
}

fn format_card(lines: &mut Vec<String>, index: usize, card: &Card) {
    let base = indent(3);
    lines.push(format!(
        "{}{} {} {}",
        base,
        format_index(index),
        card.title,
        card_detail(card)
    ));
    lines.push(format!("{}    Source: {}/", base, card.name));
    if let Some(ref bg) = card.bgimage {
        lines.push(format!("{}    Background: {}", base, bg));
    }
    for (i, media) in card.media.iter().enumerate() {
        let kind = match media.media_type {
            MediaType::Image => "image",
            MediaType::Video => "video",
        };
        let line = match media.caption {
            Some(ref caption) => format!("{} {} ({}): {}", format_index(i + 1), media.name, kind, caption),
            None => format!("{} {} ({})", format_index(i + 1), media.name, kind),
        };
        lines.push(format!("{}    {}", base, line));
    }
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Manifest write
// ============================================================================

/// Format the result of writing the manifest.
pub fn format_manifest_output(path: &Path, outcome: WriteOutcome) -> Vec<String> {
    vec![format!("Manifest → {} ({})", path.display(), outcome)]
}

/// Print manifest write output to stdout.
pub fn print_manifest_output(path: &Path, outcome: WriteOutcome) {
    for line in format_manifest_output(path, outcome) {
        println!("{}", line);
    }
}

// ============================================================================
// Document write
// ============================================================================

/// Format the result of writing the master document.
pub fn format_document_output(path: &Path, doc: &MasterDocument) -> Vec<String> {
    vec![format!(
        "Document → {} ({}, {}, {}, {})",
        path.display(),
        plural(doc.sections, "section"),
        plural(doc.cards, "card"),
        plural(doc.images, "image"),
        plural(doc.videos, "video"),
    )]
}

/// Print document write output to stdout.
pub fn print_document_output(path: &Path, doc: &MasterDocument) {
    for line in format_document_output(path, doc) {
        println!("{}", line);
    }
}
