//! Canonical descriptor locations.
//!
//! Every specification lives at `<directory>/<name><extension>` inside a
//! directory or archive. Valid names never contain `/`, so the mapping is
//! injective and depends on nothing but the name.

use crate::error::Result;
use crate::spec::NameRules;

pub const DEFAULT_SPECS_DIRECTORY: &str = "metadata/specs";
pub const DEFAULT_EXTENSION: &str = ".json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    directory: String,
    extension: String,
}

impl Layout {
    /// Leading/trailing slashes on `directory` are dropped.
    pub fn new(directory: &str, extension: &str) -> Self {
        Self {
            directory: directory.trim_matches('/').to_string(),
            extension: extension.to_string(),
        }
    }

    /// Relative path of the well-known specifications directory.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Canonical descriptor path for `name`.
    pub fn spec_path(&self, rules: &NameRules, name: &str) -> Result<String> {
        let name = rules.validate(name)?;
        Ok(format!("{}/{}{}", self.directory, name, self.extension))
    }

    /// Name encoded in a bare file name, if it is a descriptor file name.
    pub fn name_from_file_name<'a>(&self, rules: &NameRules, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.extension.as_str())
            .filter(|stem| rules.is_valid(Some(*stem)))
    }

    pub fn is_spec_file_name(&self, rules: &NameRules, file_name: &str) -> bool {
        self.name_from_file_name(rules, file_name).is_some()
    }

    /// Whether a full relative path (e.g. an archive entry) is a descriptor.
    ///
    /// Only the exact canonical path matches, so every entry discovery accepts
    /// is also found by a lookup of that name.
    pub fn is_spec_path(&self, rules: &NameRules, path: &str) -> bool {
        match path.rsplit_once('/') {
            Some((dir, file)) => dir == self.directory && self.is_spec_file_name(rules, file),
            None => false,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_SPECS_DIRECTORY, DEFAULT_EXTENSION)
    }
}
