//! Specification name rules.
//!
//! Names become file stems inside the specifications directory, so whatever
//! the pattern says, a valid name never contains a path separator.

use crate::error::{MetadataError, Result};

use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_NAME_PATTERN: &str = r"^[A-Za-z0-9_][A-Za-z0-9_-]*$";

static DEFAULT_RULES: LazyLock<NameRules> = LazyLock::new(|| NameRules {
    pattern: Regex::new(DEFAULT_NAME_PATTERN).expect("default name pattern compiles"),
});

/// Predicate over specification names.
#[derive(Debug, Clone)]
pub struct NameRules {
    pattern: Regex,
}

impl NameRules {
    /// Build rules from a custom pattern. The pattern should be anchored.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            MetadataError::InvalidConfig(format!("bad name pattern {:?}: {}", pattern, e))
        })?;
        Ok(Self { pattern })
    }

    /// Shared process-wide default rules.
    pub fn standard() -> &'static NameRules {
        &DEFAULT_RULES
    }

    /// `None` models an absent (null) name and is never valid.
    pub fn is_valid(&self, name: Option<&str>) -> bool {
        match name {
            Some(n) => {
                !n.is_empty() && !n.contains(['/', '\\']) && self.pattern.is_match(n)
            }
            None => false,
        }
    }

    pub fn validate<'a>(&self, name: &'a str) -> Result<&'a str> {
        if self.is_valid(Some(name)) {
            Ok(name)
        } else {
            Err(MetadataError::InvalidName {
                name: Some(name.to_string()),
            })
        }
    }
}

impl Default for NameRules {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}
