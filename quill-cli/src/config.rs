//! `--config` file loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quill_format::FormatOptions;
use quill_html::ScrubOptions;
use serde::Deserialize;

/// Settings read from a JSON file. Every field is optional.
///
/// ```json
/// { "format": { "right_margin": 100, "indent": 4 },
///   "scrub": "TAGS_UPPERCASE | ATTRS_UPPERCASE" }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Margin and indent for `--format`.
    pub format: FormatOptions,
    /// Base scrub flags; each mode adds its own on top.
    pub scrub: ScrubOptions,
}

impl Config {
    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid configuration")
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in config file {}", path.display()))
    }
}
