//! Configuration for the codec and layout.
//!
//! JSON shape (all fields optional):
//! {
//!   "specs_directory": "metadata/specs",
//!   "extension": ".json",
//!   "name_pattern": "^[A-Za-z0-9_][A-Za-z0-9_-]*$",
//!   "indent": 2
//! }

use crate::error::{MetadataError, Result};
use crate::spec::layout::{DEFAULT_EXTENSION, DEFAULT_SPECS_DIRECTORY};
use crate::spec::name::DEFAULT_NAME_PATTERN;

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub specs_directory: String,
    pub extension: String,
    pub name_pattern: String,
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            specs_directory: DEFAULT_SPECS_DIRECTORY.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
            indent: 2,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| MetadataError::io(path.display(), e))?;
        serde_json::from_str(&text).map_err(|e| {
            MetadataError::InvalidConfig(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    /// Structural checks that do not need the regex engine.
    pub fn check(&self) -> Result<()> {
        if self.specs_directory.trim_matches('/').is_empty() {
            return Err(MetadataError::InvalidConfig(
                "specs_directory cannot be empty".to_string(),
            ));
        }
        if self.extension.is_empty() || self.extension.contains('/') {
            return Err(MetadataError::InvalidConfig(format!(
                "extension must be a non-empty file suffix, got {:?}",
                self.extension
            )));
        }
        if self.indent == 0 {
            return Err(MetadataError::InvalidConfig(
                "indent must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
