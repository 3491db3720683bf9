//! Equality-gated writing of generated artifacts.
//!
//! The manifest lives in version control and is regenerated by CI on every
//! push. Rewriting it with identical content would still produce a commit
//! (or at least a dirty working tree), so the write is gated on content:
//!
//! 1. Build the complete output in memory.
//! 2. Read whatever is at the destination (absent = nothing).
//! 3. Byte-identical → report [`WriteOutcome::Unchanged`] and touch nothing.
//! 4. Otherwise create parent directories and overwrite.
//!
//! ## Timestamps
//!
//! The manifest carries a `generated_at` stamp that differs on every run, which
//! would defeat step 3. Before rendering, [`carry_over_timestamp`] copies the
//! previous stamp forward when the previous manifest's tree is equal to the
//! new one, so the timestamp only moves when the content does.

use crate::types::Manifest;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("cannot serialize manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What [`write_if_changed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Written => write!(f, "written"),
            WriteOutcome::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Render a manifest as 2-space indented JSON with a trailing newline.
pub fn render_manifest(manifest: &Manifest) -> Result<String, WriteError> {
    let mut text = serde_json::to_string_pretty(manifest)?;
    text.push('\n');
    Ok(text)
}

/// Keep the previous `generated_at` if the tree has not changed.
///
/// `previous` is the raw text of the last manifest, if any. Text that does
/// not parse as a manifest is ignored.
pub fn carry_over_timestamp(manifest: &mut Manifest, previous: Option<&str>) {
    let Some(previous) = previous.and_then(|text| serde_json::from_str::<Manifest>(text).ok())
    else {
        return;
    };
    if previous.units == manifest.units {
        manifest.generated_at = previous.generated_at;
    }
}

/// Write `contents` to `path` unless the file already holds exactly that.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<WriteOutcome, WriteError> {
    let existing = fs::read(path).ok();
    if existing.as_deref() == Some(contents.as_bytes()) {
        return Ok(WriteOutcome::Unchanged);
    }

    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)?;
    Ok(WriteOutcome::Written)
}

/// Render `manifest` and write it to `path` through the equality gate.
pub fn write_manifest(path: &Path, mut manifest: Manifest) -> Result<WriteOutcome, WriteError> {
    let previous = fs::read_to_string(path).ok();
    carry_over_timestamp(&mut manifest, previous.as_deref());
    let text = render_manifest(&manifest)?;
    let outcome = write_if_changed(path, &text)?;
    debug!(path = %path.display(), %outcome, "manifest write");
    Ok(outcome)
}
