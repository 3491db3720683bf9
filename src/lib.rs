//! # coursegen
//!
//! Build-time tooling for a course whose content lives in a directory tree.
//! The filesystem is the data source: four levels of directories (unit,
//! lesson, tab, card) make up the course, numeric prefixes set the order, and
//! a handful of naming conventions attach icons, backgrounds, media and
//! captions.
//!
//! # Two Independent Outputs
//!
//! ```text
//! manifest   usii/  →  usii/manifest.json   (tree → JSON for the front end)
//! document   usii/  →  master.html          (every card in one page, for PDF export)
//! ```
//!
//! The two walks share no state. The manifest walk knows the four fixed
//! levels; the document walk treats any directory with a `writing` entry as a
//! card and everything else as a heading, however deep.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the four-level tree and builds the [`types::Manifest`] |
//! | [`write`] | Serializes the manifest and writes it only when it changed |
//! | [`document`] | Renders the master HTML document using Maud |
//! | [`media`] | Icon/background precedence, media classification, caption pairing |
//! | [`naming`] | `NN_name` prefix parser and title derivation |
//! | [`source`] | Read-only filesystem seam used by the scan |
//! | [`types`] | Manifest types, serialized to `manifest.json` |
//! | [`config`] | `coursegen.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Equality-Gated Manifest
//!
//! `manifest.json` is committed alongside the content and regenerated on
//! every push. It is built completely in memory, compared byte-for-byte with
//! what is on disk, and only written when different. The `generated_at` stamp
//! is carried over from the previous file when the tree is unchanged, so an
//! untouched tree really does produce identical bytes.
//!
//! ## Sorted Walks
//!
//! Both walks sort siblings by name. Directory listing order differs between
//! platforms and filesystems; sorting keeps the manifest stable across
//! machines and lets the `01_`, `02_` prefixes drive the order.
//!
//! ## Absence Is Not An Error
//!
//! A missing icon, background, caption or unreadable subdirectory resolves to
//! `null` or an empty list and the walk continues. Only an unreadable content
//! root or an unwritable output aborts the run.

pub mod config;
pub mod document;
pub mod media;
pub mod naming;
pub mod output;
pub mod scan;
pub mod source;
pub mod types;
pub mod write;

#[cfg(test)]
pub(crate) mod test_helpers;
