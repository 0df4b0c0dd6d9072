//! The specification value type.
//!
//! A specification is a validated name plus the set of names it depends on.
//! Values are only built through the validating factories below and are never
//! mutated afterwards.

use crate::error::{MetadataError, Result};
use crate::spec::NameRules;

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Equality covers name and dependencies; hashing covers the name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specification {
    name: String,
    dependencies: BTreeSet<String>,
}

impl Specification {
    /// A specification with no dependencies.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::from_nullable(
            NameRules::standard(),
            Some(name.into()),
            None::<Vec<Option<String>>>,
        )
    }

    pub fn with_dependencies<I, S>(name: impl Into<String>, dependencies: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_rules(NameRules::standard(), name, dependencies)
    }

    /// Same as [`Specification::with_dependencies`] but validated by `rules`.
    pub fn with_rules<I, S>(rules: &NameRules, name: impl Into<String>, dependencies: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_nullable(
            rules,
            Some(name.into()),
            Some(dependencies.into_iter().map(|d| Some(Into::<String>::into(d)))),
        )
    }

    /// General factory. Absent entries stand for JSON `null` and are always
    /// rejected; an absent dependency list means "no dependencies".
    ///
    /// Dependencies are checked before the name, and every invalid dependency
    /// is reported at once.
    pub fn from_nullable<I>(
        rules: &NameRules,
        name: Option<String>,
        dependencies: Option<I>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut deps = BTreeSet::new();
        let mut invalid: BTreeSet<Option<String>> = BTreeSet::new();
        for dep in dependencies.into_iter().flatten() {
            match dep {
                Some(d) if rules.is_valid(Some(&d)) => {
                    deps.insert(d);
                }
                other => {
                    invalid.insert(other);
                }
            }
        }
        if !invalid.is_empty() {
            // Option orders None first, which is where nulls are reported.
            return Err(MetadataError::InvalidDependencyName {
                invalid: invalid.into_iter().collect(),
            });
        }

        let name = match name {
            Some(n) if rules.is_valid(Some(&n)) => n,
            other => return Err(MetadataError::InvalidName { name: other }),
        };

        Ok(Self {
            name,
            dependencies: deps,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }
}

impl Hash for Specification {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deps: Vec<&str> = self.dependencies.iter().map(String::as_str).collect();
        write!(
            f,
            "Specification{{name=\"{}\", dependencies=[{}]}}",
            self.name,
            deps.join(", ")
        )
    }
}
