//! Build configuration.
//!
//! Handles loading, validating, and merging `coursegen.toml`. Stock defaults
//! are the base layer; the project file overrides them; CLI flags override
//! both (applied in `main`).
//!
//! ## Config File Location
//!
//! `coursegen.toml` lives in the project directory, next to the content root:
//!
//! ```text
//! project/
//! ├── coursegen.toml           # Optional
//! ├── master.html              # Document output (default)
//! └── usii/                    # Content root (default)
//!     ├── manifest.json        # Manifest output (default)
//!     └── 01_colonial_america/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "usii"
//!
//! [manifest]
//! output = "usii/manifest.json"
//! # path_prefix = "usii"    # Defaults to the content root's directory name
//!
//! [document]
//! output = "master.html"
//! title = "Master Document"
//! max_heading_level = 4     # Deepest heading used for nested directories
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project config file.
pub const CONFIG_FILENAME: &str = "coursegen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `coursegen.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Path to the content root directory.
    pub content_root: PathBuf,
    /// Manifest output settings.
    pub manifest: ManifestConfig,
    /// Master document settings.
    pub document: DocumentConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("usii"),
            manifest: ManifestConfig::default(),
            document: DocumentConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Where `manifest.json` is written.
    pub output: PathBuf,
    /// Prefix for icon and background paths. `None` means the content
    /// root's directory name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("usii/manifest.json"),
            path_prefix: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Where the master HTML document is written.
    pub output: PathBuf,
    /// `<title>` of the document.
    pub title: String,
    /// Deepest heading level used for nested directories (1-6).
    pub max_heading_level: u8,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("master.html"),
            title: "Master Document".to_string(),
            max_heading_level: 4,
        }
    }
}

impl BuildConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.document.max_heading_level) {
            return Err(ConfigError::Validation(
                "document.max_heading_level must be 1-6".into(),
            ));
        }
        if self.manifest.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "manifest.output must not be empty".into(),
            ));
        }
        if self.document.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "document.output must not be empty".into(),
            ));
        }
        if self
            .manifest
            .path_prefix
            .as_deref()
            .is_some_and(|p| p.contains('\\'))
        {
            return Err(ConfigError::Validation(
                "manifest.path_prefix must use '/' separators".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(BuildConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `path`, merged over stock defaults and validated.
///
/// A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<BuildConfig, ConfigError> {
    let merged = match load_raw_config(path)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `coursegen.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# coursegen configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Directory holding the unit/lesson/tab/card tree.
content_root = "usii"

# ---------------------------------------------------------------------------
# Manifest (JSON description of the tree)
# ---------------------------------------------------------------------------
[manifest]
# Output path. Only rewritten when its content changes.
output = "usii/manifest.json"

# Prefix for icon and background paths in the manifest.
# Defaults to the content root's directory name.
# path_prefix = "usii"

# ---------------------------------------------------------------------------
# Master document (single HTML file for PDF export)
# ---------------------------------------------------------------------------
[document]
output = "master.html"
title = "Master Document"

# Deepest heading level for nested directories (1-6). Directories nested
# further reuse this level.
max_heading_level = 4
"##
}
